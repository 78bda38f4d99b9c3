mod context;
mod diag;
mod event;
mod latch;
mod provision;
mod router;
mod sequencer;
mod state;

pub use context::ConnectionContext;
pub use event::{
    EventBus, EventKind, EventMask, EventSubscriber, NetEvent, NetEventHandler, SubscribeError,
};
pub use latch::{EventLatch, LatchWait};
pub use provision::{add_network, ProvisionResult};
pub use router::NotificationRouter;
pub use sequencer::{ConnectionSequencer, LinkWait, SequencerConfig, WifiDriver};
pub use state::{NetStatusSnapshot, SequencerState};
