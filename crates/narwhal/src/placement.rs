//! Boundary between the numeric core and the host drawing surface.
//!
//! Everything in [`PlacementOptions`] belongs to the consumer: the numeric core never reads these
//! fields. It forwards them to the [`CoordinateSink`] next to each final position and fires the
//! `ready`/`stop` hooks around placement.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::graph::{LayoutResult, Point};

/// Viewport/animation/transform settings of the host surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementOptions {
    pub animate: bool,
    pub animation_duration: Duration,
    pub animation_easing: Option<String>,
    /// Pan target after placement; ignored by hosts when `fit` is set.
    pub pan: Option<Point>,
    pub zoom: Option<f64>,
    pub fit: bool,
    pub padding: Option<f64>,
    pub bounding_box: Option<BoundingBox>,
    /// Values above 1 spread nodes apart.
    pub spacing_factor: Option<f64>,
    pub node_dimensions_include_labels: Option<bool>,
    /// Which nodes animate when `animate` is on; the rest jump to their final position.
    #[serde(skip)]
    pub animate_filter: Option<HostHook<dyn Fn(&str, usize) -> bool + Send + Sync>>,
    /// Final position rewrite, applied by sinks that honor it. [`LayoutResult`] does.
    #[serde(skip)]
    pub transform: Option<HostHook<dyn Fn(&str, Point) -> Point + Send + Sync>>,
    /// Fired once coordinates are computed, before the first node is placed.
    #[serde(skip)]
    pub ready: Option<HostHook<dyn Fn() + Send + Sync>>,
    /// Fired after the last node is placed.
    #[serde(skip)]
    pub stop: Option<HostHook<dyn Fn() + Send + Sync>>,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            animate: true,
            animation_duration: Duration::from_millis(1000),
            animation_easing: None,
            pan: None,
            zoom: None,
            fit: true,
            padding: None,
            bounding_box: None,
            spacing_factor: None,
            node_dimensions_include_labels: None,
            animate_filter: None,
            transform: None,
            ready: None,
            stop: None,
        }
    }
}

impl PlacementOptions {
    pub fn with_animate_filter(
        mut self,
        f: impl Fn(&str, usize) -> bool + Send + Sync + 'static,
    ) -> Self {
        let f: Arc<dyn Fn(&str, usize) -> bool + Send + Sync> = Arc::new(f);
        self.animate_filter = Some(HostHook(f));
        self
    }

    pub fn with_transform(
        mut self,
        f: impl Fn(&str, Point) -> Point + Send + Sync + 'static,
    ) -> Self {
        let f: Arc<dyn Fn(&str, Point) -> Point + Send + Sync> = Arc::new(f);
        self.transform = Some(HostHook(f));
        self
    }

    pub fn on_ready(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        let f: Arc<dyn Fn() + Send + Sync> = Arc::new(f);
        self.ready = Some(HostHook(f));
        self
    }

    pub fn on_stop(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        let f: Arc<dyn Fn() + Send + Sync> = Arc::new(f);
        self.stop = Some(HostHook(f));
        self
    }

    /// `position` after the host `transform`, or unchanged without one.
    pub fn transformed(&self, key: &str, position: Point) -> Point {
        match &self.transform {
            Some(f) => (f.0)(key, position),
            None => position,
        }
    }

    /// Whether the host wants `key` animated into place.
    pub fn animates(&self, key: &str, ordinal: usize) -> bool {
        self.animate && self.animate_filter.as_ref().is_none_or(|f| (f.0)(key, ordinal))
    }

    pub(crate) fn notify_ready(&self) {
        if let Some(f) = &self.ready {
            (f.0)();
        }
    }

    pub(crate) fn notify_stop(&self) {
        if let Some(f) = &self.stop {
            (f.0)();
        }
    }
}

/// Shared host callback. Compares by identity, prints opaquely and is skipped by serde.
pub struct HostHook<F: ?Sized>(pub Arc<F>);

impl<F: ?Sized> Clone for HostHook<F> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<F: ?Sized> PartialEq for HostHook<F> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<F: ?Sized> fmt::Debug for HostHook<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HostHook(..)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BoundingBox {
    /// Accepts the `{ x1, y1, w, h }` form hosts also use.
    pub fn from_origin_size(x1: f64, y1: f64, w: f64, h: f64) -> Self {
        Self {
            x1,
            y1,
            x2: x1 + w,
            y2: y1 + h,
        }
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }
}

/// Receives exactly one position per node, in ordinal order.
pub trait CoordinateSink {
    fn place(&mut self, key: &str, ordinal: usize, position: Point, options: &PlacementOptions);
}

impl CoordinateSink for LayoutResult {
    fn place(&mut self, key: &str, _ordinal: usize, position: Point, options: &PlacementOptions) {
        self.positions
            .insert(key.to_string(), options.transformed(key, position));
    }
}

impl<F> CoordinateSink for F
where
    F: FnMut(&str, usize, Point),
{
    fn place(&mut self, key: &str, ordinal: usize, position: Point, _options: &PlacementOptions) {
        self(key, ordinal, position);
    }
}
