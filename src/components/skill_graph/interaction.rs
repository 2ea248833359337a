use log::debug;

use super::types::Point;

/// Window events that end a drag. A cancelled touch or pen gesture never
/// sends `pointerup`.
pub const DRAG_RELEASE_EVENTS: [&str; 2] = ["pointerup", "pointercancel"];

/// Container bounding box in client pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContainerRect {
	pub left: f64,
	pub top: f64,
	pub width: f64,
	pub height: f64,
}

impl ContainerRect {
	pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
		Self {
			left,
			top,
			width,
			height,
		}
	}

	pub fn from_dom(rect: &web_sys::DomRect) -> Self {
		Self::new(rect.left(), rect.top(), rect.width(), rect.height())
	}

	/// Client pixels to container percentages. `None` when the container has
	/// no area.
	pub fn to_percent(&self, client_x: f64, client_y: f64) -> Option<Point> {
		if !(self.width > 0.0 && self.height > 0.0) {
			return None;
		}
		let point = Point::new(
			(client_x - self.left) / self.width * 100.0,
			(client_y - self.top) / self.height * 100.0,
		);
		Some(point.clamp(0.0, 100.0))
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragState {
	pub node: usize,
	pub point: Point,
}

/// Single-pointer drag tracking: `idle -> dragging -> idle`.
#[derive(Clone, Debug, Default)]
pub struct DragController {
	active: Option<DragState>,
}

impl DragController {
	pub fn active(&self) -> Option<&DragState> {
		self.active.as_ref()
	}

	pub fn is_dragging(&self) -> bool {
		self.active.is_some()
	}

	/// Starts a drag unless one is already running. Returns whether it started.
	pub fn pointer_down(&mut self, node: usize, point: Point) -> bool {
		if self.active.is_some() {
			return false;
		}
		debug!("drag start on node {node} at ({:.1}, {:.1})", point.x, point.y);
		self.active = Some(DragState { node, point });
		true
	}

	pub fn pointer_move(&mut self, point: Point) {
		if let Some(drag) = self.active.as_mut() {
			drag.point = point;
		}
	}

	/// Ends any drag, wherever the pointer is. Returns the released node.
	pub fn pointer_up(&mut self) -> Option<usize> {
		let released = self.active.take().map(|drag| drag.node);
		if let Some(node) = released {
			debug!("drag end on node {node}");
		}
		released
	}
}
