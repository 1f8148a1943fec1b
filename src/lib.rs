//! Scrollwipe is a scroll-jacking two-image wipe controller.
//!
//! A page section shows image A and, as the reader keeps scrolling, wipes image B in from the
//! left behind a glowing divider. The section holds the scroll until the wipe completes, then
//! hands the page on to the next section. The public API is host-driven:
//!
//! - Build a [`ScrollSequence`] (or a [`Page`] that owns one) from a [`SequenceConfig`]
//! - Feed it input, visibility and time; carry out the [`HostCommand`]s it returns
//! - Read rendered frames back as [`FrameRGBA`]
#![forbid(unsafe_code)]

pub mod assets;
pub mod config;
pub mod foundation;
pub mod input;
pub mod page;
pub mod render;
pub mod sequence;

pub use crate::assets::decode::PreparedImage;
pub use crate::assets::pair::{AssetPair, AssetSlot, SlotState};
pub use crate::assets::tone::ToneAdjust;
pub use crate::config::{AssetSpec, SeparatorStyle, SequenceConfig};
pub use crate::foundation::core::{Rgba8Premul, ScrollDirection, Viewport};
pub use crate::foundation::error::{ScrollwipeError, ScrollwipeResult};
pub use crate::page::{Page, PageLayout, Section};
pub use crate::render::backend::{BackendKind, FrameRGBA, WipeBackend, WipeRequest};
pub use crate::sequence::controller::{
    HostCommand, InputOutcome, ScrollSequence, ScrollTarget, Siblings,
};
pub use crate::sequence::state::{BlendState, Phase};
