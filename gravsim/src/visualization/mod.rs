pub mod replay;
#[cfg(feature = "viewer")]
pub mod replay_vis2d;
