use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use dressing_core::account::{NewUser, UserStore};
use dressing_core::draw::{DrawItem, DrawList, PanelRole, TextAlign};
use dressing_core::gallery::GalleryLayout;
use dressing_core::input::{InputEvent, Key, PointerButton as CorePointerButton, PointerEvent, PointerKind};
use dressing_core::{
    pick_dress_brief, Catalog, DressSession, LayerPolicy, Profile, ResultView, Size, Transition, Vec2,
};
use dressing_room::{Config, JsonStore};
use eframe::egui::{self, Color32, RichText};
use tracing::{info, warn};

use crate::io::{list_avatars, load_sprite, open_store, SpritePixels};
use crate::model::{LoginForm, RegisterForm, Screen};

/// egui scroll points per wheel row
const POINTS_PER_ROW: f32 = 50.0;
const AVATAR_SIZE: u32 = 96;

enum TextureSlot {
    Loading,
    Ready(egui::TextureHandle),
    /// Asset missing or undecodable; drawn as a placeholder
    Missing,
}

struct LoadedSprite {
    key: String,
    pixels: Option<SpritePixels>,
}

pub struct DressingApp {
    config: Config,
    store: Option<JsonStore>,
    store_error: String,
    catalog: Arc<Catalog>,
    policy: LayerPolicy,
    screen: Screen,
    profile: Option<Profile>,
    two_columns: bool,
    textures: HashMap<String, TextureSlot>,
    texture_tx: Sender<LoadedSprite>,
    texture_rx: Receiver<LoadedSprite>,
}

impl DressingApp {
    pub fn new(config: Config) -> Self {
        let (store, store_error) = match open_store(&config) {
            Ok(store) => (Some(store), String::new()),
            Err(err) => {
                warn!(error = %format!("{err:#}"), "store unavailable, starting with an empty catalog");
                (None, format!("Store unavailable: {err:#}"))
            }
        };
        let catalog = Arc::new(store.as_ref().map(JsonStore::catalog).unwrap_or_default());
        info!(
            categories = catalog.categories().len(),
            garments = catalog.garment_count(),
            "catalog loaded"
        );
        let (texture_tx, texture_rx) = mpsc::channel();
        Self {
            policy: LayerPolicy::from_catalog(&catalog),
            config,
            store,
            store_error,
            catalog,
            screen: Screen::default(),
            profile: None,
            two_columns: false,
            textures: HashMap::new(),
            texture_tx,
            texture_rx,
        }
    }

    fn apply(&mut self, ctx: &egui::Context, transition: Transition) {
        self.screen = match transition {
            Transition::Login => {
                self.profile = None;
                Screen::Login(LoginForm::default())
            }
            Transition::Register => Screen::Register(RegisterForm::with_avatars(list_avatars(&self.config))),
            Transition::Menu(profile) => {
                self.profile = Some(profile.clone());
                Screen::Menu(profile)
            }
            Transition::Dress(brief) => {
                let session = DressSession::new(
                    self.catalog.clone(),
                    brief,
                    self.config.screen_layout(),
                    self.gallery_layout(),
                )
                .with_scroll_step(self.config.scroll_step.max(1) as f32);
                Screen::Dress(Box::new(session))
            }
            Transition::Result(brief) => {
                Screen::Result(ResultView::new(brief, &self.policy, self.config.screen_layout()))
            }
            Transition::Quit => {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                return;
            }
        };
    }

    fn gallery_layout(&self) -> GalleryLayout {
        let mut layout = self.config.gallery_layout();
        if self.two_columns {
            layout.columns = 2;
            layout.thumb = Size::new(140.0, 140.0);
        }
        layout
    }

    fn texture_key(asset: &str, size: [u32; 2]) -> String {
        format!("{asset}@{}x{}", size[0], size[1])
    }

    /// Texture for an asset at a size, decoding it in the background on
    /// first use
    fn texture(&mut self, asset: &str, size: [u32; 2]) -> Option<&TextureSlot> {
        let key = Self::texture_key(asset, size);
        if !self.textures.contains_key(&key) {
            self.textures.insert(key.clone(), TextureSlot::Loading);
            let path = self.config.resolve_asset(asset);
            let sender = self.texture_tx.clone();
            let thread_key = key.clone();
            std::thread::spawn(move || {
                let pixels = match load_sprite(&path, size[0], size[1]) {
                    Ok(pixels) => Some(pixels),
                    Err(err) => {
                        warn!(error = %format!("{err:#}"), "asset unavailable, drawing placeholder");
                        None
                    }
                };
                let _ = sender.send(LoadedSprite {
                    key: thread_key,
                    pixels,
                });
            });
        }
        self.textures.get(&key)
    }

    fn poll_textures(&mut self, ctx: &egui::Context) {
        while let Ok(loaded) = self.texture_rx.try_recv() {
            let slot = match loaded.pixels {
                Some(sprite) if sprite.size[0] > 0 && sprite.size[1] > 0 => {
                    let image = egui::ColorImage::from_rgba_unmultiplied(sprite.size, &sprite.pixels);
                    TextureSlot::Ready(ctx.load_texture(&loaded.key, image, egui::TextureOptions::LINEAR))
                }
                _ => TextureSlot::Missing,
            };
            self.textures.insert(loaded.key, slot);
        }
        if self.textures.values().any(|slot| matches!(slot, TextureSlot::Loading)) {
            ctx.request_repaint();
        }
    }

    fn paint(&mut self, ui: &egui::Ui, list: DrawList) {
        let painter = ui.painter().clone();
        let origin = ui.max_rect().min.to_vec2();
        let to_pos = |v: Vec2| egui::pos2(v.x, v.y) + origin;

        for item in list {
            match item {
                DrawItem::Panel { role, rect } => {
                    let rect = egui::Rect::from_min_size(to_pos(rect.top_left()), egui::vec2(rect.width, rect.height));
                    let rounding = match role {
                        PanelRole::ScrollRail => 2.0,
                        PanelRole::ScrollThumb => 4.0,
                        _ => 0.0,
                    };
                    painter.rect_filled(rect, rounding, panel_color(role));
                }
                DrawItem::Sprite { sprite, pos } => {
                    let rect = egui::Rect::from_min_size(to_pos(pos), egui::vec2(sprite.size.width, sprite.size.height));
                    let size = [sprite.size.width as u32, sprite.size.height as u32];
                    match self.texture(&sprite.asset, size) {
                        Some(TextureSlot::Ready(texture)) => {
                            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                            painter.image(texture.id(), rect, uv, Color32::WHITE);
                        }
                        Some(TextureSlot::Missing) => {
                            painter.rect_filled(rect, 0.0, Color32::from_rgb(230, 220, 220));
                            painter.rect_stroke(rect, 0.0, egui::Stroke::new(2.0, Color32::from_rgb(120, 120, 140)));
                        }
                        _ => {}
                    }
                }
                DrawItem::Text { text, pos, size, align } => {
                    let galley = painter.layout_no_wrap(text, egui::FontId::proportional(size), Color32::from_rgb(20, 20, 50));
                    let mut min = to_pos(pos);
                    if align == TextAlign::Right {
                        min.x -= galley.size().x;
                    }
                    let backdrop = egui::Rect::from_min_size(min, galley.size()).expand2(egui::vec2(10.0, 5.0));
                    painter.rect_filled(backdrop, 4.0, Color32::from_rgba_unmultiplied(255, 255, 255, 200));
                    painter.galley(min, galley, Color32::from_rgb(20, 20, 50));
                }
            }
        }
    }

    /// Pointer, wheel and key input of this frame, relative to `origin`
    fn collect_input(ctx: &egui::Context, origin: egui::Vec2) -> Vec<InputEvent> {
        ctx.input(|input| {
            let to_core = |pos: egui::Pos2| Vec2::new(pos.x - origin.x, pos.y - origin.y);
            let mut events = Vec::new();
            for event in &input.events {
                match event {
                    egui::Event::PointerButton {
                        pos, button, pressed, ..
                    } => {
                        let button = match button {
                            egui::PointerButton::Primary => CorePointerButton::Primary,
                            egui::PointerButton::Secondary => CorePointerButton::Secondary,
                            _ => continue,
                        };
                        let kind = if *pressed { PointerKind::Down } else { PointerKind::Up };
                        events.push(InputEvent::Pointer(PointerEvent {
                            kind,
                            pos: to_core(*pos),
                            button,
                        }));
                    }
                    egui::Event::PointerMoved(pos) => events.push(InputEvent::moved(to_core(*pos))),
                    _ => {}
                }
            }

            let scroll = input.raw_scroll_delta.y;
            if scroll != 0.0 {
                if let Some(pos) = input.pointer.hover_pos() {
                    events.push(InputEvent::wheel(scroll / POINTS_PER_ROW, to_core(pos)));
                }
            }
            if input.key_pressed(egui::Key::Enter) {
                events.push(InputEvent::Key(Key::Enter));
            }
            if input.key_pressed(egui::Key::R) {
                events.push(InputEvent::Key(Key::R));
            }
            events
        })
    }

    fn login_ui(&mut self, ctx: &egui::Context, form: &mut LoginForm) -> Option<Transition> {
        let mut transition = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(120.0);
                ui.heading("Dressing Room");
                ui.add_space(24.0);
                ui.label("Username");
                ui.text_edit_singleline(&mut form.username);
                ui.label("Password");
                let password = ui.add(egui::TextEdit::singleline(&mut form.password).password(true));
                ui.add_space(12.0);

                let submitted = password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Sign in").clicked() || submitted {
                    transition = self.sign_in(form);
                }
                if ui.button("Create an account").clicked() {
                    transition = Some(Transition::Register);
                }
                if ui.button("Quit").clicked() {
                    transition = Some(Transition::Quit);
                }
                if !form.message.is_empty() {
                    ui.add_space(12.0);
                    ui.label(RichText::new(&form.message).color(Color32::from_rgb(200, 80, 60)));
                }
            });
        });
        transition
    }

    fn sign_in(&mut self, form: &mut LoginForm) -> Option<Transition> {
        let Some(store) = &self.store else {
            form.message = self.store_error.clone();
            return None;
        };
        match store.authenticate(&form.username, &form.password) {
            Ok(profile) => Some(Transition::Menu(profile)),
            Err(err) => {
                form.message = err.to_string();
                None
            }
        }
    }

    fn register_ui(&mut self, ctx: &egui::Context, form: &mut RegisterForm) -> Option<Transition> {
        let mut transition = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(60.0);
                ui.heading("Create an account");
                ui.add_space(16.0);
                ui.label("Username");
                ui.text_edit_singleline(&mut form.username);
                ui.label("Display name");
                ui.text_edit_singleline(&mut form.display_name);
                ui.label("Password");
                ui.add(egui::TextEdit::singleline(&mut form.password).password(true));
                ui.add_space(12.0);

                if let Some(avatar) = form.selected_avatar().cloned() {
                    self.avatar_image(ui, &avatar);
                }
                ui.horizontal(|ui| {
                    if ui.button("< Previous").clicked() {
                        form.previous_avatar();
                    }
                    if ui.button("Next >").clicked() {
                        form.next_avatar();
                    }
                });
                ui.add_space(12.0);

                if ui.button("Create").clicked() {
                    transition = self.register(form);
                }
                if ui.button("Back").clicked() {
                    transition = Some(Transition::Login);
                }
                if !form.message.is_empty() {
                    ui.add_space(12.0);
                    ui.label(RichText::new(&form.message).color(Color32::from_rgb(200, 80, 60)));
                }
            });
        });
        transition
    }

    fn register(&mut self, form: &mut RegisterForm) -> Option<Transition> {
        let avatar = form.selected_avatar().cloned();
        let Some(store) = &mut self.store else {
            form.message = self.store_error.clone();
            return None;
        };
        let mut user = NewUser::new(form.username.clone(), form.display_name.clone(), form.password.clone());
        if let Some(avatar) = avatar {
            user = user.with_avatar(avatar);
        }
        match store.create_user(user) {
            Ok(profile) => Some(Transition::Menu(profile)),
            Err(err) => {
                form.message = err.to_string();
                None
            }
        }
    }

    fn avatar_image(&mut self, ui: &mut egui::Ui, avatar: &str) {
        let size = egui::vec2(AVATAR_SIZE as f32, AVATAR_SIZE as f32);
        match self.texture(avatar, [AVATAR_SIZE, AVATAR_SIZE]) {
            Some(TextureSlot::Ready(texture)) => {
                ui.add(egui::Image::new(texture).fit_to_exact_size(size));
            }
            _ => {
                let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
                ui.painter().rect_filled(rect, 8.0, Color32::from_rgb(230, 220, 220));
            }
        }
    }

    fn menu_ui(&mut self, ctx: &egui::Context, profile: &Profile) -> Option<Transition> {
        let mut transition = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(100.0);
                self.avatar_image(ui, &profile.avatar);
                ui.heading(format!("Hello, {}", profile.display_name));
                ui.add_space(24.0);
                if ui.button("Play").clicked() {
                    let brief = pick_dress_brief(self.catalog.models(), &mut rand::thread_rng());
                    info!(theme = %brief.theme.code, character = %brief.character.name, "new dressing session");
                    transition = Some(Transition::Dress(brief));
                }
                let label = if self.two_columns { "Gallery: 2 columns" } else { "Gallery: 1 column" };
                if ui.button(label).clicked() {
                    self.two_columns = !self.two_columns;
                }
                if ui.button("Sign out").clicked() {
                    transition = Some(Transition::Login);
                }
                if ui.button("Quit").clicked() {
                    transition = Some(Transition::Quit);
                }
            });
        });
        transition
    }

    fn dress_ui(&mut self, ctx: &egui::Context, session: &mut DressSession) -> Option<Transition> {
        let mut transition = None;
        egui::CentralPanel::default().frame(egui::Frame::none()).show(ctx, |ui| {
            let origin = ui.max_rect().min.to_vec2();
            for event in Self::collect_input(ctx, origin) {
                if let Some(next) = session.handle(event) {
                    transition = Some(next);
                    break;
                }
            }
            self.paint(ui, session.draw());
        });
        transition
    }

    fn result_ui(&mut self, ctx: &egui::Context, view: &ResultView) -> Option<Transition> {
        let mut transition = None;
        egui::CentralPanel::default().frame(egui::Frame::none()).show(ctx, |ui| {
            let origin = ui.max_rect().min.to_vec2();
            for event in Self::collect_input(ctx, origin) {
                let next = match &self.profile {
                    Some(profile) => view.handle(event, profile),
                    None if event == InputEvent::Key(Key::R) => Some(Transition::Login),
                    None => None,
                };
                if next.is_some() {
                    transition = next;
                    break;
                }
            }
            self.paint(ui, view.draw());
        });
        transition
    }
}

fn panel_color(role: PanelRole) -> Color32 {
    match role {
        PanelRole::Backdrop => Color32::from_rgb(240, 240, 245),
        PanelRole::SidebarBackground => Color32::from_rgb(226, 228, 240),
        PanelRole::StageBackground => Color32::from_rgb(248, 244, 250),
        PanelRole::ScrollRail => Color32::from_rgb(220, 220, 230),
        PanelRole::ScrollThumb => Color32::from_rgb(160, 160, 180),
    }
}

impl eframe::App for DressingApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_textures(ctx);

        let mut screen = std::mem::take(&mut self.screen);
        let transition = match &mut screen {
            Screen::Login(form) => self.login_ui(ctx, form),
            Screen::Register(form) => self.register_ui(ctx, form),
            Screen::Menu(profile) => {
                let profile = profile.clone();
                self.menu_ui(ctx, &profile)
            }
            Screen::Dress(session) => self.dress_ui(ctx, session),
            Screen::Result(view) => self.result_ui(ctx, view),
        };
        self.screen = screen;

        if let Some(transition) = transition {
            self.apply(ctx, transition);
        }
    }
}
