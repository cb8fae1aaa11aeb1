use super::model::{Focus, MenuModel};
use super::view::{RenderOutcome, RenderStats, Renderer};
use crate::anim::{AnimationClock, FrameParams, Profile, params_for};
use crate::error::{MenuError, RenderError};
use crate::events::{MenuActivated, MenuUpdate};
use crate::geometry::{self, Point, Size};
use crate::style::MenuStyle;
use cairo::ImageSurface;
use std::num::NonZeroU32;

/// Where the menu is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    /// Settled; pointer moves update the focus.
    Idle(Focus),
    /// A session is running; pointer input is ignored.
    Animating(Profile),
}

#[derive(Debug, Clone)]
enum Phase {
    Idle { focus: Focus },
    Animating { clock: AnimationClock, focus: Focus },
}

/// The radial menu widget core. Feed it the host's events and paint what
/// [`paint`](Self::paint) hands back.
pub struct RadialMenu {
    model: MenuModel,
    style: MenuStyle,
    step: NonZeroU32,
    phase: Phase,
    frame: FrameParams,
    size: Size,
    renderer: Renderer,
}

impl RadialMenu {
    /// Builds the menu and starts the entering animation.
    pub fn new(model: MenuModel, style: MenuStyle) -> Result<Self, MenuError> {
        let step = style.validate()?;
        let mut menu = Self {
            model,
            style,
            step,
            phase: Phase::Idle { focus: Focus::None },
            frame: FrameParams::REST,
            size: Size::default(),
            renderer: Renderer::new(),
        };
        let _ = menu.begin(Profile::Entering, Focus::None);
        Ok(menu)
    }

    pub fn state(&self) -> MenuState {
        match &self.phase {
            Phase::Idle { focus } => MenuState::Idle(*focus),
            Phase::Animating { clock, .. } => MenuState::Animating(clock.profile()),
        }
    }

    pub fn focus(&self) -> Focus {
        match &self.phase {
            Phase::Idle { focus } | Phase::Animating { focus, .. } => *focus,
        }
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Animating { .. })
    }

    pub fn model(&self) -> &MenuModel {
        &self.model
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Parameters of the frame the next paint will show.
    pub fn frame(&self) -> FrameParams {
        self.frame
    }

    pub fn render_stats(&self) -> RenderStats {
        self.renderer.stats()
    }

    fn begin(&mut self, profile: Profile, focus: Focus) -> MenuUpdate {
        let mut clock = AnimationClock::new(self.step);
        clock.start(profile);
        log::debug!("Starting {} animation (step {})", profile, clock.step());

        let frame = params_for(profile, clock.progress());
        let changed = frame != self.frame;
        self.frame = frame;
        self.phase = Phase::Animating { clock, focus };
        MenuUpdate::redraw(changed)
    }

    /// Re-arms the entering animation with nothing focused. Whatever session
    /// was running is dropped.
    pub fn open(&mut self) -> MenuUpdate {
        self.begin(Profile::Entering, Focus::None)
    }

    /// Runs one animation step. The frame for the current progress becomes
    /// the one to paint, then the clock advances.
    pub fn tick(&mut self) -> MenuUpdate {
        let Phase::Animating { clock, focus } = &mut self.phase else {
            return MenuUpdate::default();
        };

        let profile = clock.profile();
        let frame = params_for(profile, clock.progress());
        clock.tick();
        let settled = (!clock.is_running()).then_some(*focus);

        let changed = frame != self.frame;
        self.frame = frame;

        if let Some(focus) = settled {
            log::debug!("{} animation finished", profile);
            self.phase = Phase::Idle { focus };
        }
        MenuUpdate::redraw(changed)
    }

    /// Hit-tests the pointer while idle. Moves during an animation are
    /// dropped.
    pub fn pointer_moved(&mut self, pointer: Point) -> MenuUpdate {
        let Phase::Idle { focus } = &mut self.phase else {
            return MenuUpdate::default();
        };

        let next = geometry::classify(
            pointer,
            self.size,
            self.style.center_radius(),
            self.model.item_count(),
        );
        if *focus == next {
            return MenuUpdate::default();
        }

        log::trace!("Focus {:?} -> {:?}", focus, next);
        *focus = next;
        self.renderer.invalidate();
        MenuUpdate::redraw(true)
    }

    /// Commits the current focus and starts the leaving animation.
    ///
    /// Only meaningful while idle; a click that lands mid-animation is
    /// ignored.
    pub fn activate(&mut self) -> MenuUpdate {
        let Phase::Idle { focus } = self.phase else {
            log::debug!("Ignoring activation during animation");
            return MenuUpdate::default();
        };

        let activated = MenuActivated::from_focus(focus);
        log::info!("Menu activated: {}", activated);
        let update = self.begin(Profile::Leaving, focus);
        MenuUpdate::new(update.should_redraw, Some(activated))
    }

    /// Records the surface size used for hit-testing and painting.
    pub fn resize(&mut self, size: Size) -> MenuUpdate {
        if self.size == size {
            return MenuUpdate::default();
        }
        self.size = size;
        MenuUpdate::redraw(true)
    }

    /// Swaps in new items and style. A focused wedge that no longer exists
    /// is dropped; the running animation keeps its old step.
    pub fn reconfigure(&mut self, model: MenuModel, style: MenuStyle) -> Result<(), MenuError> {
        self.step = style.validate()?;
        self.model = model;
        self.style = style;

        let count = self.model.item_count().get();
        let (Phase::Idle { focus } | Phase::Animating { focus, .. }) = &mut self.phase;
        if focus.wedge_index().is_some_and(|i| i >= count) {
            *focus = Focus::None;
        }

        self.renderer.invalidate();
        Ok(())
    }

    /// Drives the running animation to its end without painting.
    pub fn finish_animation(&mut self) {
        while self.is_animating() {
            let _ = self.tick();
        }
    }

    /// Renders the current frame and returns the image to present, or
    /// `None` for an empty surface.
    pub fn paint(&mut self) -> Result<Option<&ImageSurface>, RenderError> {
        let focus = self.focus();
        let outcome =
            self.renderer
                .render(self.size, &self.model, &self.style, focus, self.frame)?;

        Ok(match outcome {
            RenderOutcome::Degenerate => None,
            RenderOutcome::Drawn | RenderOutcome::Unchanged => self.renderer.output(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu_200() -> RadialMenu {
        let mut menu = RadialMenu::new(MenuModel::default(), MenuStyle::default()).unwrap();
        let _ = menu.resize(Size::new(200, 200));
        menu
    }

    fn settle(menu: &mut RadialMenu) -> usize {
        let mut ticks = 0;
        while menu.is_animating() {
            let _ = menu.tick();
            ticks += 1;
        }
        ticks
    }

    #[test]
    fn test_open_select_activate() {
        let mut menu = menu_200();
        assert_eq!(menu.state(), MenuState::Animating(Profile::Entering));

        assert_eq!(settle(&mut menu), 16);
        assert_eq!(menu.state(), MenuState::Idle(Focus::None));
        assert_eq!(menu.frame(), FrameParams::REST);

        let update = menu.pointer_moved(Point::new(150.0, 100.0));
        assert!(update.should_redraw);
        assert_eq!(menu.state(), MenuState::Idle(Focus::Wedge(0)));

        let update = menu.activate();
        assert_eq!(
            update.activated,
            Some(MenuActivated {
                focused_center: false,
                index: Some(0),
            })
        );
        assert_eq!(menu.state(), MenuState::Animating(Profile::Leaving));
        assert_eq!(menu.focus(), Focus::Wedge(0));

        settle(&mut menu);
        assert_eq!(menu.state(), MenuState::Idle(Focus::Wedge(0)));
        assert_eq!(menu.frame(), FrameParams::new(60.0, 0.0, 0.0));
    }

    #[test]
    fn test_center_click() {
        let mut menu = menu_200();
        settle(&mut menu);
        let _ = menu.pointer_moved(Point::new(100.0, 100.0));
        assert_eq!(menu.focus(), Focus::Center);

        let activated = menu.activate().activated.unwrap();
        assert!(activated.focused_center);
        assert_eq!(activated.menu_index(), -1);
    }

    #[test]
    fn test_pointer_ignored_while_animating() {
        let mut menu = menu_200();
        let update = menu.pointer_moved(Point::new(150.0, 100.0));
        assert!(!update.should_redraw);
        assert_eq!(menu.focus(), Focus::None);
    }

    #[test]
    fn test_activation_ignored_while_animating() {
        let mut menu = menu_200();
        let _ = menu.tick();
        let update = menu.activate();
        assert_eq!(update, MenuUpdate::default());
        assert_eq!(menu.state(), MenuState::Animating(Profile::Entering));
    }

    #[test]
    fn test_redraw_only_on_focus_change() {
        let mut menu = menu_200();
        settle(&mut menu);
        assert!(menu.pointer_moved(Point::new(180.0, 110.0)).should_redraw);
        assert!(!menu.pointer_moved(Point::new(170.0, 105.0)).should_redraw);
        assert!(menu.pointer_moved(Point::new(100.0, 180.0)).should_redraw);
        assert_eq!(menu.focus(), Focus::Wedge(1));
    }

    #[test]
    fn test_ticks_request_redraw_when_frame_moves() {
        let mut menu = menu_200();
        // first frame is the hidden one the menu was created with
        assert!(!menu.tick().should_redraw);
        assert!(menu.tick().should_redraw);
        assert_eq!(menu.frame(), params_for(Profile::Entering, 4));
    }

    #[test]
    fn test_open_clears_focus_and_restarts() {
        let mut menu = menu_200();
        settle(&mut menu);
        let _ = menu.pointer_moved(Point::new(150.0, 100.0));
        let update = menu.open();
        assert!(update.should_redraw);
        assert_eq!(menu.state(), MenuState::Animating(Profile::Entering));
        assert_eq!(menu.focus(), Focus::None);
        assert_eq!(menu.frame(), params_for(Profile::Entering, 0));
    }

    #[test]
    fn test_paint_is_memoized() {
        let mut menu = menu_200();
        settle(&mut menu);
        assert!(menu.paint().unwrap().is_some());
        assert!(menu.paint().unwrap().is_some());
        let stats = menu.render_stats();
        assert_eq!((stats.composites, stats.blends, stats.skips), (1, 1, 1));

        let _ = menu.pointer_moved(Point::new(150.0, 100.0));
        menu.paint().unwrap();
        assert_eq!(menu.render_stats().composites, 2);
    }

    #[test]
    fn test_painting_between_ticks_shows_every_step() {
        let mut menu = menu_200();
        menu.paint().unwrap();
        let mut ticks = 0;
        while menu.is_animating() {
            let _ = menu.tick();
            menu.paint().unwrap();
            ticks += 1;
        }
        assert_eq!(ticks, 16);

        // progress 0, 4, .., 60 each blended once; the first tick repeats 0
        let stats = menu.render_stats();
        assert_eq!(stats.blends, 16);
        assert_eq!(stats.skips, 1);
        assert_eq!(stats.composites, 1);
    }

    #[test]
    fn test_paint_without_size() {
        let mut menu = RadialMenu::new(MenuModel::default(), MenuStyle::default()).unwrap();
        assert!(menu.paint().unwrap().is_none());
    }

    #[test]
    fn test_reconfigure_drops_missing_focus() {
        let mut menu = menu_200();
        settle(&mut menu);
        let _ = menu.pointer_moved(Point::new(100.0, 20.0));
        assert_eq!(menu.focus(), Focus::Wedge(4));

        let model = MenuModel::new(["Yes", "No"]).unwrap();
        menu.reconfigure(model, MenuStyle::default()).unwrap();
        assert_eq!(menu.focus(), Focus::None);
        assert_eq!(menu.model().item_count().get(), 2);
    }

    #[test]
    fn test_invalid_style_is_rejected() {
        let style = MenuStyle {
            step: 0,
            ..MenuStyle::default()
        };
        assert_eq!(
            RadialMenu::new(MenuModel::default(), style.clone()).err(),
            Some(MenuError::ZeroStep)
        );

        let mut menu = menu_200();
        assert!(menu.reconfigure(MenuModel::default(), style).is_err());
        assert_eq!(menu.step.get(), 4);
        assert_eq!(menu.style.step, 4);
    }

    #[test]
    fn test_custom_step_changes_tick_count() {
        let style = MenuStyle {
            step: 15,
            ..MenuStyle::default()
        };
        let mut menu = RadialMenu::new(MenuModel::default(), style).unwrap();
        // 4 advancing ticks, one settling
        assert_eq!(settle(&mut menu), 5);
    }
}
