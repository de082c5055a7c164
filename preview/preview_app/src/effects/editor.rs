use crux_core::capability::Operation;
use crux_core::{Command, Request};

/// Changes made in the editing surface, passed through to the host.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub enum EditorOperation {
    CodeChanged { code: String },
    DtsChanged { dts: String },
}

impl Operation for EditorOperation {
    type Output = ();
}

pub fn code_changed<Effect, Event>(code: String) -> Command<Effect, Event>
where
    Effect: From<Request<EditorOperation>> + Send + 'static,
    Event: Send + 'static,
{
    Command::notify_shell(EditorOperation::CodeChanged {
        code,
    })
    .into()
}

pub fn dts_changed<Effect, Event>(dts: String) -> Command<Effect, Event>
where
    Effect: From<Request<EditorOperation>> + Send + 'static,
    Event: Send + 'static,
{
    Command::notify_shell(EditorOperation::DtsChanged {
        dts,
    })
    .into()
}
