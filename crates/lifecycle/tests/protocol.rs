use lifecycle::{
    CanvasId, HandleTable, RefreshSource, RenderEngine, SceneChange, SceneIndex, SchedulerState,
    SurfaceController,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Create(SceneIndex),
    Frame(CanvasId),
    Change(CanvasId, SceneIndex),
    Resize(CanvasId, u32, u32),
    Destroy(CanvasId),
}

#[derive(Debug, thiserror::Error)]
#[error("surface rejected by engine")]
struct Rejected;

#[derive(Default)]
struct RecordingEngine {
    canvases: HandleTable<SceneIndex>,
    calls: Vec<Call>,
    reject_next: bool,
}

impl RecordingEngine {
    fn rejecting() -> Self {
        Self {
            reject_next: true,
            ..Self::default()
        }
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|call| pred(call)).count()
    }

    fn frames(&self) -> usize {
        self.count(|call| matches!(call, Call::Frame(_)))
    }

    fn changes(&self) -> Vec<SceneIndex> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Change(_, scene) => Some(*scene),
                _ => None,
            })
            .collect()
    }
}

impl RenderEngine for RecordingEngine {
    type Descriptor = ();
    type Error = Rejected;

    fn create(&mut self, _: &(), scene: SceneIndex) -> Result<CanvasId, Rejected> {
        self.calls.push(Call::Create(scene));
        if std::mem::take(&mut self.reject_next) {
            return Err(Rejected);
        }
        Ok(self.canvases.insert(scene))
    }

    fn enter_frame(&mut self, id: CanvasId) {
        assert!(self.canvases.contains(id), "frame on dead canvas {id}");
        self.calls.push(Call::Frame(id));
    }

    fn change_example(&mut self, id: CanvasId, scene: SceneIndex) {
        if let Some(current) = self.canvases.get_mut(id) {
            *current = scene;
        }
        self.calls.push(Call::Change(id, scene));
    }

    fn resize(&mut self, id: CanvasId, width: u32, height: u32) {
        self.calls.push(Call::Resize(id, width, height));
    }

    fn destroy(&mut self, id: CanvasId) {
        assert!(self.canvases.remove(id).is_some(), "double destroy of {id}");
        self.calls.push(Call::Destroy(id));
    }
}

#[derive(Debug, Default)]
struct RecordingRefresh {
    requests: usize,
    cancels: usize,
}

impl RefreshSource for RecordingRefresh {
    fn request_tick(&mut self) {
        self.requests += 1;
    }

    fn cancel(&mut self) {
        self.cancels += 1;
    }
}

fn controller() -> SurfaceController<RecordingRefresh> {
    SurfaceController::new(RecordingRefresh::default(), SceneIndex(0))
}

#[test]
fn create_three_ticks_then_destroy() {
    let mut engine = RecordingEngine::default();
    let mut view = controller();

    let id = view
        .on_surface_created(&mut engine, &(), SceneIndex(0))
        .unwrap();
    for _ in 0..3 {
        assert!(view.on_tick(&mut engine));
    }
    assert!(view.on_surface_destroyed(&mut engine));

    assert_eq!(
        engine.calls,
        vec![
            Call::Create(SceneIndex(0)),
            Call::Frame(id),
            Call::Frame(id),
            Call::Frame(id),
            Call::Destroy(id),
        ]
    );
    assert!(engine.changes().is_empty());
    assert_eq!(view.scheduler().state(), SchedulerState::Stopped);
}

#[test]
fn failed_creation_leaves_view_inert() {
    let mut engine = RecordingEngine::rejecting();
    let mut view = controller();

    let err = view
        .on_surface_created(&mut engine, &(), SceneIndex(0))
        .unwrap_err();
    assert!(err.to_string().contains("could not create"));
    assert!(!view.is_valid());

    assert!(!view.on_tick(&mut engine));
    assert!(!view.on_tick(&mut engine));
    assert!(!view.on_surface_destroyed(&mut engine));

    assert_eq!(engine.frames(), 0);
    assert_eq!(engine.count(|call| matches!(call, Call::Destroy(_))), 0);
    assert_eq!(view.refresh().requests, 0, "scheduler never armed");
}

#[test]
fn repeated_scene_is_skipped() {
    let mut engine = RecordingEngine::default();
    let mut view = controller();
    view.on_surface_created(&mut engine, &(), SceneIndex(0))
        .unwrap();

    assert_eq!(
        view.change_scene(&mut engine, SceneIndex(2)),
        SceneChange::Applied {
            previous: SceneIndex(0)
        }
    );
    assert_eq!(
        view.change_scene(&mut engine, SceneIndex(2)),
        SceneChange::Unchanged
    );
    assert_eq!(
        view.change_scene(&mut engine, SceneIndex(3)),
        SceneChange::Applied {
            previous: SceneIndex(2)
        }
    );
    view.on_surface_destroyed(&mut engine);

    assert_eq!(engine.changes(), vec![SceneIndex(2), SceneIndex(3)]);
}

#[test]
fn each_creation_yields_a_fresh_handle() {
    let mut engine = RecordingEngine::default();
    let mut view = controller();
    let mut seen = Vec::new();

    for _ in 0..5 {
        let id = view
            .on_surface_created(&mut engine, &(), SceneIndex(1))
            .unwrap();
        assert!(!seen.contains(&id), "handle {id} reused");
        seen.push(id);
        view.on_surface_destroyed(&mut engine);
    }
    assert_eq!(view.creations(), 5);
}

#[test]
fn calls_without_a_canvas_reach_nothing() {
    let mut engine = RecordingEngine::default();
    let mut view = controller();

    for index in 0..4 {
        assert!(!view.on_tick(&mut engine));
        assert_eq!(
            view.change_scene(&mut engine, SceneIndex(index)),
            SceneChange::Dropped
        );
        view.on_surface_resized(&mut engine, 640, 480);
    }
    assert!(!view.on_surface_destroyed(&mut engine));
    assert!(engine.calls.is_empty());
}

#[test]
fn frames_match_ticks_while_valid() {
    let mut engine = RecordingEngine::default();
    let mut view = controller();
    let id = view
        .on_surface_created(&mut engine, &(), SceneIndex(0))
        .unwrap();

    const TICKS: usize = 40;
    for _ in 0..TICKS {
        view.on_tick(&mut engine);
    }

    assert_eq!(engine.frames(), TICKS);
    assert!(engine.calls[1..].iter().all(|call| *call == Call::Frame(id)));
    assert_eq!(view.scheduler().frames(), TICKS as u64);
    // One request on start plus one re-arm per tick.
    assert_eq!(view.refresh().requests, TICKS + 1);
}

#[test]
fn nothing_reaches_a_generation_after_its_destroy() {
    let mut engine = RecordingEngine::default();
    let mut view = controller();
    let first = view
        .on_surface_created(&mut engine, &(), SceneIndex(0))
        .unwrap();
    view.on_tick(&mut engine);
    view.on_surface_destroyed(&mut engine);

    // The tick armed by the last frame still arrives from the platform.
    assert!(!view.on_tick(&mut engine));
    view.change_scene(&mut engine, SceneIndex(4));

    let second = view
        .on_surface_created(&mut engine, &(), SceneIndex(0))
        .unwrap();
    view.on_tick(&mut engine);
    view.on_surface_destroyed(&mut engine);

    let destroyed_at = engine
        .calls
        .iter()
        .position(|call| *call == Call::Destroy(first))
        .unwrap();
    assert!(engine.calls[destroyed_at + 1..].iter().all(|call| match call {
        Call::Frame(id) | Call::Change(id, _) | Call::Resize(id, _, _) => *id != first,
        _ => true,
    }));
    assert_eq!(engine.calls.last(), Some(&Call::Destroy(second)));
    assert_eq!(view.refresh().cancels, 2);
}

#[test]
fn duplicate_surface_created_keeps_the_bound_canvas() {
    let mut engine = RecordingEngine::default();
    let mut view = controller();
    let id = view
        .on_surface_created(&mut engine, &(), SceneIndex(0))
        .unwrap();
    let again = view
        .on_surface_created(&mut engine, &(), SceneIndex(3))
        .unwrap();

    assert_eq!(id, again);
    assert_eq!(engine.count(|call| matches!(call, Call::Create(_))), 1);
    assert_eq!(view.current_scene(), SceneIndex(0));
    assert_eq!(view.refresh().requests, 1);
}

#[test]
fn recreation_starts_from_the_offered_scene() {
    let mut engine = RecordingEngine::default();
    let mut view = controller();
    view.on_surface_created(&mut engine, &(), SceneIndex(0))
        .unwrap();
    view.change_scene(&mut engine, SceneIndex(2));
    view.on_surface_destroyed(&mut engine);

    let id = view
        .on_surface_created(&mut engine, &(), SceneIndex(2))
        .unwrap();
    assert_eq!(view.current_scene(), SceneIndex(2));
    assert_eq!(
        view.change_scene(&mut engine, SceneIndex(2)),
        SceneChange::Unchanged
    );
    view.on_surface_resized(&mut engine, 800, 600);
    assert_eq!(engine.calls.last(), Some(&Call::Resize(id, 800, 600)));
}
