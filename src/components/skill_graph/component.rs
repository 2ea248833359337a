use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, MouseEvent, PointerEvent, Window};

use super::error::GraphError;
use super::interaction::{ContainerRect, DRAG_RELEASE_EVENTS};
use super::model::GraphModel;
use super::physics::PhysicsConfig;
use super::render;
use super::scheduler::{FrameLoop, WindowListener};
use super::state::SkillGraphState;
use super::types::{Point, Taxonomy};

type SharedState = Rc<RefCell<Option<SkillGraphState>>>;

/// What the detail panel shows for the active skill.
#[derive(Clone, Debug, PartialEq)]
pub struct SkillDetail {
	pub name: String,
	pub category: String,
	pub description: String,
}

impl SkillDetail {
	fn from_state(state: &SkillGraphState) -> Option<Self> {
		let node = state.active_skill()?;
		Some(Self {
			name: node.label.clone(),
			category: state
				.category_label(&node.category)
				.unwrap_or(&node.category)
				.to_string(),
			description: node.description.clone().unwrap_or_default(),
		})
	}
}

/// Frame loop and window listeners of a mounted graph; dropping it tears
/// everything down.
struct Mounted {
	_frames: FrameLoop,
	_listeners: Vec<WindowListener>,
}

fn canvas_context(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, GraphError> {
	canvas
		.get_context("2d")
		.map_err(|_| GraphError::Canvas("get_context threw"))?
		.ok_or(GraphError::Canvas("missing 2d context"))?
		.dyn_into()
		.map_err(|_| GraphError::Canvas("context is not 2d"))
}

fn container_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.unwrap_or((0.0, 0.0))
}

fn fit_canvas(canvas: &HtmlCanvasElement) -> (f64, f64) {
	let (w, h) = container_size(canvas);
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);
	(w, h)
}

fn pointer_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> Option<Point> {
	ContainerRect::from_dom(&canvas.get_bounding_client_rect())
		.to_percent(ev.client_x() as f64, ev.client_y() as f64)
}

fn mount(
	window: &Window,
	canvas: &HtmlCanvasElement,
	taxonomy: &Taxonomy,
	physics: PhysicsConfig,
	state: SharedState,
	active: RwSignal<Option<SkillDetail>>,
	query: &str,
) -> Result<Mounted, GraphError> {
	let model = GraphModel::build(taxonomy)?;
	let ctx = canvas_context(canvas)?;
	let (w, h) = fit_canvas(canvas);

	let mut graph = SkillGraphState::new(model, physics, w, h);
	graph.set_query(query);
	active.set(SkillDetail::from_state(&graph));
	*state.borrow_mut() = Some(graph);

	let (state_move, canvas_move) = (state.clone(), canvas.clone());
	let on_move = WindowListener::attach(window, "pointermove", move |ev: Event| {
		let Some(ev) = ev.dyn_ref::<MouseEvent>() else {
			return;
		};
		if let Some(ref mut s) = *state_move.borrow_mut() {
			if !s.drag.is_dragging() {
				return;
			}
			if let Some(point) = pointer_point(&canvas_move, ev) {
				s.pointer_move(point);
			}
		}
	})?;

	let mut listeners = vec![on_move];
	for event in DRAG_RELEASE_EVENTS {
		let state_up = state.clone();
		listeners.push(WindowListener::attach(window, event, move |_: Event| {
			if let Some(ref mut s) = *state_up.borrow_mut() {
				s.pointer_up();
			}
		})?);
	}

	let (state_resize, canvas_resize) = (state.clone(), canvas.clone());
	let on_resize = WindowListener::attach(window, "resize", move |_: Event| {
		let (w, h) = fit_canvas(&canvas_resize);
		if let Some(ref mut s) = *state_resize.borrow_mut() {
			s.resize(w, h);
		}
	})?;
	listeners.push(on_resize);

	let state_frame = state.clone();
	let frames = FrameLoop::start(window.clone(), move |timestamp| {
		if let Some(ref mut s) = *state_frame.borrow_mut() {
			if s.advance(timestamp) {
				render::render(s, &ctx);
			}
		}
	})?;

	Ok(Mounted {
		_frames: frames,
		_listeners: listeners,
	})
}

/// Interactive force-directed graph of a skill taxonomy, with a search box
/// in the middle and a detail panel for the selected skill.
#[component]
pub fn SkillGraph(
	#[prop(into)] taxonomy: Signal<Taxonomy>,
	#[prop(optional)] physics: PhysicsConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let mounted = StoredValue::new_local(None::<Mounted>);
	let (query, set_query) = signal(String::new());
	let active = RwSignal::new(None::<SkillDetail>);

	let state_init = state.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let taxonomy = taxonomy.get();
		let Some(window) = web_sys::window() else {
			return;
		};

		mounted.set_value(None);
		match mount(
			&window,
			&canvas,
			&taxonomy,
			physics,
			state_init.clone(),
			active,
			&query.get_untracked(),
		) {
			Ok(handles) => mounted.set_value(Some(handles)),
			Err(err) => error!("skill graph failed to mount: {err}"),
		}
	});

	let state_query = state.clone();
	Effect::new(move |_| {
		let q = query.get();
		if let Some(ref mut s) = *state_query.borrow_mut() {
			if s.set_query(&q) {
				active.set(SkillDetail::from_state(s));
			}
		}
	});

	on_cleanup(move || {
		mounted.try_update_value(|handles| {
			handles.take();
		});
	});

	let state_down = state.clone();
	let on_pointerdown = move |ev: PointerEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(point) = pointer_point(&canvas, &ev) else {
			return;
		};
		let mut guard = state_down.borrow_mut();
		let Some(s) = guard.as_mut() else {
			return;
		};
		let Some(node) = s.node_at_position(point) else {
			return;
		};
		ev.prevent_default();
		if s.pointer_down(node, point) {
			active.set(SkillDetail::from_state(s));
		}
	};

	view! {
		<div class="skill-graph" style="position: relative; width: 100%; height: 100%;">
			<canvas
				node_ref=canvas_ref
				class="skill-graph-canvas"
				on:pointerdown=on_pointerdown
				style="display: block; touch-action: none; cursor: grab;"
			/>
			<div
				class="skill-graph-search"
				style="position: absolute; left: 50%; top: 50%; transform: translate(-50%, -50%);"
			>
				<input
					type="search"
					placeholder="Search skills"
					prop:value=query
					on:input=move |ev| set_query.set(event_target_value(&ev))
				/>
			</div>
			{move || {
				active
					.get()
					.map(|detail| {
						view! {
							<aside class="skill-graph-detail">
								<span class="skill-graph-detail-category">{detail.category}</span>
								<h3>{detail.name}</h3>
								<p>{detail.description}</p>
							</aside>
						}
					})
			}}
		</div>
	}
}
