use std::sync::Arc;

use anyhow::{anyhow, Result};
use crtcore::{compute_letterbox, LetterBox, MenuKey, Session, SessionEvent, Vec2};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

use tracing::{debug, error, info};

use crate::gpu::GpuState;
use crate::types::{GalleryImage, RenderPolicy, RendererConfig};

/// Owns the window loop: feeds key events and frame ticks into the session,
/// renders the current gallery image through the CRT pipeline, and handles
/// the one-shot export policy.
pub struct Renderer {
    config: RendererConfig,
    session: Session,
    images: Vec<GalleryImage>,
}

impl Renderer {
    pub fn new(config: RendererConfig, session: Session, images: Vec<GalleryImage>) -> Self {
        Self {
            config,
            session,
            images,
        }
    }

    pub fn run(self) -> Result<()> {
        let Renderer {
            config,
            mut session,
            images,
        } = self;

        let event_loop =
            EventLoop::new().map_err(|err| anyhow!("failed to create event loop: {err}"))?;

        let content = session.gallery().current().size;
        let scale = config.default_scale.max(1);
        let window_size = PhysicalSize::new(
            content.x as u32 * scale,
            content.y as u32 * scale,
        );
        let window = WindowBuilder::new()
            .with_title(&config.title)
            .with_inner_size(window_size)
            .build(&event_loop)
            .map_err(|err| anyhow!("failed to create window: {err}"))?;
        let window = Arc::new(window);

        let mut gpu = GpuState::new(window.as_ref(), window.inner_size(), &images)?;
        drop(images);

        // Overlay/menu visibility is loop state, orthogonal to the session.
        let mut show_menu = true;
        let mut exported = false;

        event_loop
            .run(move |event, elwt| {
                elwt.set_control_flow(ControlFlow::Poll);
                match event {
                    Event::WindowEvent { window_id, event } if window_id == window.id() => {
                        match event {
                            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                                elwt.exit();
                            }
                            WindowEvent::KeyboardInput { event, .. } => {
                                handle_key(&event, &mut session, &mut gpu, &mut show_menu, elwt);
                            }
                            WindowEvent::Resized(new_size) => {
                                gpu.resize(new_size);
                            }
                            WindowEvent::RedrawRequested => {
                                if show_menu {
                                    if let Some(SessionEvent::ImageChanged { index }) =
                                        session.tick()
                                    {
                                        gpu.set_current_image(index);
                                    }
                                }

                                if let RenderPolicy::Export { path, keep_open } = &config.policy {
                                    if !exported {
                                        exported = true;
                                        let content = session.gallery().current().size;
                                        let width = content.x as u32 * scale;
                                        let height = content.y as u32 * scale;
                                        let letterbox = LetterBox {
                                            scale: f64::from(scale),
                                            offset: Vec2::new(0.0, 0.0),
                                        };
                                        let result = gpu.render_to_png(
                                            path,
                                            width,
                                            height,
                                            letterbox,
                                            content,
                                            session.params(),
                                        );
                                        match result {
                                            Ok(()) => {
                                                if !keep_open {
                                                    elwt.exit();
                                                    return;
                                                }
                                            }
                                            Err(err) => {
                                                error!(error = %err, "failed to export frame");
                                                elwt.exit();
                                                return;
                                            }
                                        }
                                    }
                                }

                                let size = gpu.size();
                                let container =
                                    Vec2::new(f64::from(size.width), f64::from(size.height));
                                let content = session.gallery().current().size;
                                let letterbox = compute_letterbox(container, content);
                                match gpu.render(letterbox, content, session.params()) {
                                    Ok(()) => {}
                                    Err(
                                        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated,
                                    ) => {
                                        gpu.resize(gpu.size());
                                    }
                                    Err(wgpu::SurfaceError::OutOfMemory) => {
                                        error!("surface out of memory; exiting");
                                        elwt.exit();
                                    }
                                    Err(err) => {
                                        debug!(?err, "surface error; retrying next frame");
                                    }
                                }
                            }
                            _ => {}
                        }
                    }
                    Event::AboutToWait => {
                        window.request_redraw();
                    }
                    _ => {}
                }
            })
            .map_err(|err| anyhow!("window event loop error: {err}"))?;

        Ok(())
    }
}

fn handle_key(
    event: &KeyEvent,
    session: &mut Session,
    gpu: &mut GpuState,
    show_menu: &mut bool,
    elwt: &winit::event_loop::EventLoopWindowTarget<()>,
) {
    // Releases always reach the repeat tracker, even with the menu hidden,
    // so held-key state cannot go stale.
    if event.state == ElementState::Released {
        if let Some(key) = menu_key_for(&event.logical_key) {
            session.key_released(key);
        }
        return;
    }

    if event.repeat {
        // The session runs its own repeat timing.
        return;
    }

    match &event.logical_key {
        Key::Named(NamedKey::Escape) => {
            elwt.exit();
            return;
        }
        Key::Named(NamedKey::F1) => {
            *show_menu = !*show_menu;
            info!(visible = *show_menu, "parameter menu toggled");
            return;
        }
        _ => {}
    }

    if !*show_menu {
        return;
    }

    if let Some(key) = menu_key_for(&event.logical_key) {
        apply_event(session.key_pressed(key), session, gpu);
        log_selected(session);
        return;
    }

    if let Key::Character(value) = &event.logical_key {
        match value.to_ascii_lowercase().as_str() {
            "r" => {
                session.apply(crtcore::InputAction::ResetParams);
                info!("parameters reset to defaults");
            }
            "z" => {
                apply_event(session.apply(crtcore::InputAction::PrevImage), session, gpu);
            }
            "x" => {
                apply_event(session.apply(crtcore::InputAction::NextImage), session, gpu);
            }
            _ => {}
        }
    }
}

fn apply_event(event: Option<SessionEvent>, session: &Session, gpu: &mut GpuState) {
    if let Some(SessionEvent::ImageChanged { index }) = event {
        gpu.set_current_image(index);
        let entry = session.gallery().current();
        info!(
            image = %entry.desc,
            width = entry.size.x,
            height = entry.size.y,
            "switched gallery image"
        );
    }
}

fn log_selected(session: &Session) {
    let param = session.params().get(session.cursor());
    debug!(name = param.name, value = param.value, "selected parameter");
}

fn menu_key_for(key: &Key) -> Option<MenuKey> {
    match key {
        Key::Named(NamedKey::ArrowDown) => Some(MenuKey::CursorDown),
        Key::Named(NamedKey::ArrowUp) => Some(MenuKey::CursorUp),
        Key::Named(NamedKey::ArrowLeft) => Some(MenuKey::ValueDown),
        Key::Named(NamedKey::ArrowRight) => Some(MenuKey::ValueUp),
        _ => None,
    }
}
