use crux_core::capability::Operation;
use crux_core::{Command, Request};

/// The host owns the manual edits file, the core only requests updates.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub enum ManualEditsOperation {
    Update { content: String },
}

impl Operation for ManualEditsOperation {
    type Output = ();
}

pub fn update<Effect, Event>(content: String) -> Command<Effect, Event>
where
    Effect: From<Request<ManualEditsOperation>> + Send + 'static,
    Event: Send + 'static,
{
    Command::notify_shell(ManualEditsOperation::Update {
        content,
    })
    .into()
}
