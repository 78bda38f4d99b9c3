#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequencerState {
    Idle,
    Requesting,
    AwaitingLink,
    Connected,
    Failed,
    AwaitingAddress,
    Done,
}

impl SequencerState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Requesting => "Requesting",
            Self::AwaitingLink => "AwaitingLink",
            Self::Connected => "Connected",
            Self::Failed => "Failed",
            Self::AwaitingAddress => "AwaitingAddress",
            Self::Done => "Done",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NetStatusSnapshot {
    pub state: SequencerState,
    pub link: bool,
    pub last_status_code: i32,
    pub address: bool,
    pub attempt: u32,
}
