use std::{num::NonZeroUsize, sync::Arc};

use vello::{
    AaConfig, Renderer, RendererOptions, Scene,
    kurbo::{Affine, PathEl, Stroke},
    peniko::{
        BrushRef, Color,
        color::{AlphaColor, Srgb, palette},
    },
    util::{RenderContext, RenderSurface},
    wgpu,
};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, WindowEvent},
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
};

pub use winit::error::EventLoopError;

use crate::frame::{FrameHandle, Viewport};
use crate::refresh::RefreshLoop;

/// User event raised by the refresh loop after each publish.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FramePublished;

/// Stroke colors for the two series.
const SERIES_COLORS: [AlphaColor<Srgb>; 2] = [palette::css::RED, palette::css::LIME];

const CURVE_STROKE_WIDTH: f64 = 1.5;

pub(crate) fn run(handle: Arc<FrameHandle>) -> Result<(), EventLoopError> {
    let event_loop = EventLoop::<FramePublished>::with_user_event().build()?;

    let proxy = event_loop.create_proxy();
    let refresh = RefreshLoop::spawn(Arc::clone(&handle), move || {
        let _ = proxy.send_event(FramePublished);
    });

    let mut app = HurstApp::new(handle);
    event_loop.run_app(&mut app)?;

    refresh.stop();
    Ok(())
}

struct HurstApp<'s> {
    handle: Arc<FrameHandle>,

    context: RenderContext,
    render_state: Option<RenderState<'s>>,
    renderers: Vec<Option<Renderer>>,
}

impl HurstApp<'_> {
    fn new(handle: Arc<FrameHandle>) -> Self {
        Self {
            handle,
            context: RenderContext::new(),
            render_state: None,
            renderers: Vec::new(),
        }
    }

    fn build_scene(&self) -> Scene {
        let mut scene = Scene::new();

        let Some(frame) = self.handle.current_frame() else {
            return scene;
        };

        for (points, color) in frame.curves.iter().zip(SERIES_COLORS) {
            let path = points
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    if i == 0 {
                        PathEl::MoveTo((p.x, p.y).into())
                    } else {
                        PathEl::LineTo((p.x, p.y).into())
                    }
                })
                .collect::<Vec<_>>();

            scene.stroke(
                &Stroke::new(CURVE_STROKE_WIDTH),
                Affine::IDENTITY,
                BrushRef::Solid(color),
                None,
                &path.as_slice(),
            );
        }

        scene
    }
}

impl ApplicationHandler<FramePublished> for HurstApp<'_> {
    fn resumed(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        if self.render_state.is_some() {
            return;
        }

        let window = Arc::new(
            event_loop
                .create_window(
                    winit::window::Window::default_attributes()
                        .with_inner_size(LogicalSize::new(800, 600))
                        .with_resizable(true)
                        .with_title("Hurst simulator"),
                )
                .unwrap(),
        );
        let size = window.inner_size();
        let present_mode = vello::wgpu::PresentMode::AutoVsync;
        let surface_future =
            self.context
                .create_surface(window.clone(), size.width, size.height, present_mode);
        let surface = pollster::block_on(surface_future).expect("Error creating surface");

        self.handle
            .set_viewport(Viewport::new(size.width as f64, size.height as f64));

        self.renderers
            .resize_with(self.context.devices.len(), || None);

        let id = surface.dev_id;
        self.renderers[id].get_or_insert_with(|| {
            let device_handle = &self.context.devices[id];

            Renderer::new(
                &device_handle.device,
                RendererOptions {
                    use_cpu: false,
                    antialiasing_support: [AaConfig::Area].iter().copied().collect(),
                    num_init_threads: NonZeroUsize::new(1),
                    pipeline_cache: None,
                },
            )
            .unwrap()
        });

        tracing::info!(width = size.width, height = size.height, "window created");
        self.render_state = Some(RenderState { surface, window });
    }

    fn user_event(
        &mut self,
        _event_loop: &winit::event_loop::ActiveEventLoop,
        _event: FramePublished,
    ) {
        if let Some(RenderState { window, .. }) = &self.render_state {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: winit::event::WindowEvent,
    ) {
        let Some(render_state) = &mut self.render_state else {
            return;
        };
        if render_state.window.id() != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                match event.logical_key.as_ref() {
                    Key::Named(NamedKey::Escape) => event_loop.exit(),
                    _ => {}
                }
            }
            WindowEvent::Resized(size) => {
                if let Some(RenderState { surface, window }) = &mut self.render_state {
                    self.context
                        .resize_surface(surface, size.width, size.height);

                    // The next refresh cycle normalizes against the new
                    // rectangle; until then the previous frame is shown
                    // at its old size.
                    self.handle
                        .set_viewport(Viewport::new(size.width as f64, size.height as f64));

                    window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => {
                let scene = self.build_scene();

                let Some(RenderState { surface, .. }) = &self.render_state else {
                    return;
                };
                let width = surface.config.width;
                let height = surface.config.height;

                let device_handle = &self.context.devices[surface.dev_id];

                let render_params = vello::RenderParams {
                    base_color: Color::WHITE,
                    width,
                    height,
                    antialiasing_method: vello::AaConfig::Area,
                };

                self.renderers[surface.dev_id]
                    .as_mut()
                    .unwrap()
                    .render_to_texture(
                        &device_handle.device,
                        &device_handle.queue,
                        &scene,
                        &surface.target_view,
                        &render_params,
                    )
                    .expect("failed to render to texture");

                let surface_texture = surface
                    .surface
                    .get_current_texture()
                    .expect("failed to get surface texture");
                let mut encoder =
                    device_handle
                        .device
                        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("Surface Blit"),
                        });
                surface.blitter.copy(
                    &device_handle.device,
                    &mut encoder,
                    &surface.target_view,
                    &surface_texture
                        .texture
                        .create_view(&wgpu::TextureViewDescriptor::default()),
                );
                device_handle.queue.submit([encoder.finish()]);
                surface_texture.present();

                let _ = device_handle.device.poll(wgpu::Maintain::Poll);
            }
            _ => {}
        }
    }
}

struct RenderState<'s> {
    surface: RenderSurface<'s>,
    window: Arc<winit::window::Window>,
}
