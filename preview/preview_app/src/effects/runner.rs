use crux_core::capability::Operation;
use crux_core::{Command, Request};

/// Asks the shell to execute the code and produce circuit json.
///
/// Results are reported back via `Event::RunFinished`, `Event::CircuitJsonChanged` and `Event::ErrorMessageChanged`.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub enum RunOperation {
    Run { trigger_count: u32 },
}

impl Operation for RunOperation {
    type Output = ();
}

pub fn run<Effect, Event>(trigger_count: u32) -> Command<Effect, Event>
where
    Effect: From<Request<RunOperation>> + Send + 'static,
    Event: Send + 'static,
{
    Command::notify_shell(RunOperation::Run {
        trigger_count,
    })
    .into()
}
