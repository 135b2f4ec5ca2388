//! Dialog messages

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMessage {
    Close,

    NextField,

    PrevField,

    /// Switch the bulk rename target between name and entity id
    ToggleTarget,

    /// Submit the rename / apply the bulk rename
    Confirm,

    Input(char),

    Backspace,
}
