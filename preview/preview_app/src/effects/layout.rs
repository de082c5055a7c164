use crux_core::capability::Operation;
use crux_core::{Command, Request};

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub enum LayoutOperation {
    /// The host decides and reports back via `Event::SetFullScreen`
    ToggleFullScreen,
}

impl Operation for LayoutOperation {
    type Output = ();
}

pub fn toggle_full_screen<Effect, Event>() -> Command<Effect, Event>
where
    Effect: From<Request<LayoutOperation>> + Send + 'static,
    Event: Send + 'static,
{
    Command::notify_shell(LayoutOperation::ToggleFullScreen).into()
}
