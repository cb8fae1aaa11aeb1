use crate::config::{self, ConfigError, Overrides};
use crate::events::AppEvent;
use crate::gui::window::{self, DEFAULT_WINDOW_SIZE};
use gtk::prelude::*;
use gtk4 as gtk;
use radial::{MenuActivated, MenuModel, MenuStyle, MenuUpdate, Point, RadialMenu, Size};
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

const PRIMARY_BUTTON: u32 = 1;

/// What a released mouse button does to the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClickAction {
    /// Commit the focus and close.
    Activate,
    /// Replay the entering animation. A closed menu has no other way back.
    Reopen,
}

impl ClickAction {
    fn for_button(button: u32) -> Self {
        match button {
            PRIMARY_BUTTON => Self::Activate,
            _ => Self::Reopen,
        }
    }
}

pub struct AppModel {
    pub menu: Rc<RefCell<RadialMenu>>,
    pub overrides: Overrides,
    pub drawing_area: gtk::DrawingArea,
    /// Set while a frame clock callback is stepping the animation.
    ticking: Rc<Cell<bool>>,
}

#[derive(Debug)]
pub enum AppMsg {
    CursorMove(Point),
    Click(u32),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (RadialMenu, Overrides, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Radial"),
            set_default_size: (DEFAULT_WINDOW_SIZE, DEFAULT_WINDOW_SIZE),
            add_css_class: "radial-window",

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "radial-drawing-area",

                add_controller = gtk::EventControllerMotion {
                    connect_motion[sender] => move |_, x, y| {
                        sender.input(AppMsg::CursorMove(Point::new(x, y)));
                    }
                },

                add_controller = gtk::GestureClick {
                    set_button: 0, // every button, see ClickAction
                    connect_released[sender] => move |gesture, _, _, _| {
                        sender.input(AppMsg::Click(gesture.current_button()));
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (menu, overrides, rx) = init;

        window::load_css();

        let model = AppModel {
            menu: Rc::new(RefCell::new(menu)),
            overrides,
            drawing_area: gtk::DrawingArea::default(),
            ticking: Rc::new(Cell::new(false)),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let menu_draw = model.menu.clone();
        widgets
            .drawing_area
            .set_draw_func(move |_, cr, width, height| {
                let mut menu = menu_draw.borrow_mut();
                let _ = menu.resize(Size::new(width, height));
                match menu.paint() {
                    Ok(Some(surface)) => {
                        if let Err(e) = cr
                            .set_source_surface(surface, 0.0, 0.0)
                            .and_then(|()| cr.paint())
                        {
                            log::error!("Presenting error: {}", e);
                        }
                    }
                    Ok(None) => {}
                    Err(e) => log::error!("Drawing error: {}", e),
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        // the menu starts out entering
        model.arm_ticker();

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        let update = match msg {
            AppMsg::CursorMove(point) => self.menu.borrow_mut().pointer_moved(point),
            AppMsg::Click(button) => match ClickAction::for_button(button) {
                ClickAction::Activate => {
                    let update = self.menu.borrow_mut().activate();
                    if let Some(activated) = update.activated {
                        self.report(activated);
                    }
                    update
                }
                ClickAction::Reopen => self.menu.borrow_mut().open(),
            },
            AppMsg::ConfigReload => self.reload_config(),
        };

        if self.menu.borrow().is_animating() {
            self.arm_ticker();
        }
        if update.should_redraw {
            self.drawing_area.queue_draw();
        }
    }
}

impl AppModel {
    /// Steps the animation once per frame clock tick, so every step is
    /// painted. The callback removes itself when the animation settles.
    fn arm_ticker(&self) {
        if self.ticking.replace(true) {
            return;
        }
        let menu = self.menu.clone();
        let ticking = self.ticking.clone();
        self.drawing_area.add_tick_callback(move |area, _clock| {
            let mut menu = menu.borrow_mut();
            if menu.tick().should_redraw {
                area.queue_draw();
            }
            if menu.is_animating() {
                glib::ControlFlow::Continue
            } else {
                ticking.set(false);
                glib::ControlFlow::Break
            }
        });
    }

    /// Hands the chosen label to whoever launched us, one per line.
    fn report(&self, activated: MenuActivated) {
        let menu = self.menu.borrow();
        match menu.model().label_for(menu.focus()) {
            Some(label) => println!("{}", label),
            None => log::info!("Menu dismissed without a selection ({})", activated),
        }
    }

    fn reload_config(&mut self) -> MenuUpdate {
        let reconfigured = self.load_menu_config().and_then(|(model, style)| {
            self.menu
                .borrow_mut()
                .reconfigure(model, style)
                .map_err(ConfigError::from)
        });

        match reconfigured {
            Ok(()) => {
                log::info!("Configuration reloaded");
                MenuUpdate::redraw(true)
            }
            Err(e) => {
                log::error!("Failed to reload config: {}", e);
                MenuUpdate::default()
            }
        }
    }

    fn load_menu_config(&self) -> Result<(MenuModel, MenuStyle), ConfigError> {
        let mut config = config::load_config()?;
        self.overrides.apply(&mut config);
        Ok((config.to_model()?, config.style))
    }
}
