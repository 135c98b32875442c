pub mod controller;
pub mod gesture;
pub mod surface;
pub mod window;

pub use controller::{
    PullRefreshController, RefreshDone, RefreshFn, RefreshPoll, RefreshTask, TouchReaction,
};
pub use gesture::{GesturePhase, MoveResponse, PullConfig, PullGesture, Release};
pub use surface::{ScrollSurface, ScrollTopCell, TouchEvent, TouchPhase};
pub use window::{list_window, ListWindow, DEFAULT_OVERSCAN};
