//! pathchain drives an actor along a chain of curves and draws the chain as it goes.
//!
//! The moving parts:
//!
//! - Build a [`PathChain`] with [`PathChainBuilder`] or load one from a [`ChainDoc`]
//! - Hand it to a [`PathFollower`] and call [`PathFollower::tick`] once per simulation step
//! - Read the displayed [`Pose`] and composite the chain into a [`Frame`] with
//!   [`PathFollower::render`]
//!
//! Each segment of the chain takes a fixed amount of time. The full chain is drawn once
//! into a cached base surface; the active segment is highlighted on an overlay that is
//! redrawn only when the active segment changes.
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod follow;
pub(crate) mod host;
pub(crate) mod path;
pub(crate) mod render;
pub(crate) mod style;
/// Logical-to-pixel coordinate transforms.
pub mod transform;

pub use crate::foundation::core::{Affine, BezPath, Canvas, Point, Pose, Rgb8, Vec2};
pub use crate::foundation::error::{PathchainError, PathchainResult};

pub use crate::animation::ease::Ease;
pub use crate::follow::config::{
    DEFAULT_ACTOR_OPACITY, DEFAULT_ACTOR_SIZE, DEFAULT_SEGMENT_SECS, DEFAULT_SKIP_TICKS,
    FollowerConfig,
};
pub use crate::follow::follower::{FollowState, PathFollower};
pub use crate::follow::mapper::{SegmentMapper, SegmentPosition};
pub use crate::host::entity::Entity;
pub use crate::host::stage::Stage;
pub use crate::path::builder::PathChainBuilder;
pub use crate::path::chain::PathChain;
pub use crate::path::curve::{BezierCurve, Curve, HeadingInterpolation};
pub use crate::path::doc::{ChainDoc, CurveDoc};
pub use crate::render::frame::Frame;
pub use crate::render::path_renderer::{PathRenderer, RendererStats};
pub use crate::render::surface::Surface;
pub use crate::style::path_style::PathStyle;
pub use crate::style::theme::Theme;
pub use crate::transform::{CoordinateTransform, FieldTransform, PixelTransform};
