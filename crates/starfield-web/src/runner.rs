use starfield::{InputEvent, InputQueue, RenderBuffer, SceneState, Surface};

/// Drives one mounted scene: queues host input, steps the simulation once
/// per animation frame and hands the result to the drawing surface.
///
/// Holds no browser handles itself, so it runs the same against a canvas
/// or a `HeadlessSurface`.
pub struct SceneRunner {
    scene: SceneState,
    input: InputQueue,
    render_buffer: RenderBuffer,
    surface: Box<dyn Surface>,
    low_perf_reported: bool,
}

impl SceneRunner {
    pub fn new(scene: SceneState, mut surface: Box<dyn Surface>) -> Self {
        surface.resize(&scene.viewport());
        log::info!("runner: drawing through {}", surface.backend());
        Self {
            scene,
            input: InputQueue::new(),
            render_buffer: RenderBuffer::new(),
            surface,
            low_perf_reported: false,
        }
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneState {
        &mut self.scene
    }

    /// Queue an event for the next frame.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame at host time `now_ms`. Returns true on the frame the
    /// scene drops into low-performance mode.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        let before = self.scene.viewport();
        self.scene.handle_input(&mut self.input);
        self.scene.step(now_ms);

        let viewport = self.scene.viewport();
        if viewport != before {
            self.surface.resize(&viewport);
        }

        self.scene.render(&mut self.render_buffer);
        self.surface.draw(&self.render_buffer, &viewport);

        if self.scene.is_low_perf() && !self.low_perf_reported {
            self.low_perf_reported = true;
            return true;
        }
        false
    }

    // ---- Pointer accessors for direct buffer reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn is_low_perf(&self) -> bool {
        self.scene.is_low_perf()
    }
}
