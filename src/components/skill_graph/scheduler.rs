//! `requestAnimationFrame` loop and window listeners that clean up after
//! themselves on drop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{Event, Window};

use super::error::GraphError;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A self-rescheduling frame callback with an explicit run flag.
///
/// Each frame runs `on_frame` once and then queues the next frame, so the
/// loop never recurses. Dropping the handle cancels the pending frame and
/// releases the callback.
pub struct FrameLoop {
	window: Window,
	running: Rc<Cell<bool>>,
	frame_id: Rc<Cell<Option<i32>>>,
	callback: FrameCallback,
}

impl FrameLoop {
	pub fn start(window: Window, mut on_frame: impl FnMut(f64) + 'static) -> Result<Self, GraphError> {
		let running = Rc::new(Cell::new(true));
		let frame_id = Rc::new(Cell::new(None));
		let callback: FrameCallback = Rc::new(RefCell::new(None));

		let (running_cb, frame_id_cb, callback_cb, window_cb) = (
			running.clone(),
			frame_id.clone(),
			callback.clone(),
			window.clone(),
		);
		*callback.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
			frame_id_cb.set(None);
			if !running_cb.get() {
				return;
			}
			on_frame(timestamp);
			if let Some(ref cb) = *callback_cb.borrow() {
				match window_cb.request_animation_frame(cb.as_ref().unchecked_ref()) {
					Ok(id) => frame_id_cb.set(Some(id)),
					Err(_) => {
						warn!("animation frame request failed, stopping skill graph loop");
						running_cb.set(false);
					}
				}
			}
		}));

		let first = match *callback.borrow() {
			Some(ref cb) => window
				.request_animation_frame(cb.as_ref().unchecked_ref())
				.map_err(|_| GraphError::AnimationFrame)?,
			None => return Err(GraphError::AnimationFrame),
		};
		frame_id.set(Some(first));

		Ok(Self {
			window,
			running,
			frame_id,
			callback,
		})
	}

	pub fn cancel(&self) {
		self.running.set(false);
		if let Some(id) = self.frame_id.take() {
			let _ = self.window.cancel_animation_frame(id);
		}
		// The closure holds a handle to itself; dropping it breaks the cycle.
		self.callback.borrow_mut().take();
	}
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		self.cancel();
	}
}

/// A window event listener removed again on drop.
pub struct WindowListener {
	window: Window,
	event: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

impl WindowListener {
	pub fn attach(
		window: &Window,
		event: &'static str,
		handler: impl FnMut(Event) + 'static,
	) -> Result<Self, GraphError> {
		let callback = Closure::<dyn FnMut(Event)>::new(handler);
		window
			.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
			.map_err(|_| GraphError::Listener(event))?;
		Ok(Self {
			window: window.clone(),
			event,
			callback,
		})
	}
}

impl Drop for WindowListener {
	fn drop(&mut self) {
		let _ = self
			.window
			.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
	}
}
