use super::model::{Focus, ItemLabel, MenuModel};
use crate::anim::FrameParams;
use crate::error::RenderError;
use crate::geometry::{self, Point, Size};
use crate::style::{HexColor, MenuStyle};
use cairo::{Context, Format, ImageSurface};
use std::f64::consts::TAU;
use std::num::NonZeroUsize;

/// The result of a [`Renderer::render`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The final surface changed and should be presented.
    Drawn,
    /// Same frame as last time; nothing was touched.
    Unchanged,
    /// Zero-sized surface, nothing to draw on.
    Degenerate,
}

/// How much work the renderer has done, for tests and debug logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub composites: u64,
    pub blends: u64,
    pub skips: u64,
}

struct Surfaces {
    size: Size,
    /// Untransformed menu.
    composite: ImageSurface,
    /// Composite after rotation, scale and alpha.
    output: ImageSurface,
}

impl Surfaces {
    fn create(size: Size) -> Result<Self, cairo::Error> {
        Ok(Self {
            size,
            composite: ImageSurface::create(Format::ARgb32, size.width, size.height)?,
            output: ImageSurface::create(Format::ARgb32, size.width, size.height)?,
        })
    }
}

/// Owns the two backing surfaces and skips work that the last frame
/// already did.
#[derive(Default)]
pub struct Renderer {
    surfaces: Option<Surfaces>,
    last_frame: Option<FrameParams>,
    composite_focus: Option<Focus>,
    stats: RenderStats,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets the cached frame and composite so the next render redraws
    /// from scratch.
    pub fn invalidate(&mut self) {
        self.last_frame = None;
        self.composite_focus = None;
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// The presented image, once something has been rendered.
    pub fn output(&self) -> Option<&ImageSurface> {
        self.surfaces.as_ref().map(|s| &s.output)
    }

    pub fn render(
        &mut self,
        size: Size,
        model: &MenuModel,
        style: &MenuStyle,
        focus: Focus,
        frame: FrameParams,
    ) -> Result<RenderOutcome, RenderError> {
        if size.is_empty() {
            if self.surfaces.take().is_some() {
                log::debug!("Surface collapsed to {}x{}", size.width, size.height);
            }
            self.invalidate();
            return Ok(RenderOutcome::Degenerate);
        }

        if self.surfaces.as_ref().is_none_or(|s| s.size != size) {
            log::debug!("Allocating {}x{} surfaces", size.width, size.height);
            self.surfaces = Some(Surfaces::create(size)?);
            self.invalidate();
        }

        if self.last_frame == Some(frame) {
            self.stats.skips += 1;
            return Ok(RenderOutcome::Unchanged);
        }

        let Some(surfaces) = self.surfaces.as_mut() else {
            return Ok(RenderOutcome::Degenerate);
        };

        // a failure half way leaves the surfaces in an unknown state
        self.last_frame = None;

        if self.composite_focus != Some(focus) {
            self.composite_focus = None;
            MenuPainter::new(model, style, focus, size).paint(&surfaces.composite)?;
            key_out(&mut surfaces.composite, style.background_color)?;
            self.composite_focus = Some(focus);
            self.stats.composites += 1;
        }

        blend(&surfaces.composite, &surfaces.output, size, style, frame)?;
        key_out(&mut surfaces.output, style.background_color)?;
        self.last_frame = Some(frame);
        self.stats.blends += 1;

        Ok(RenderOutcome::Drawn)
    }
}

fn set_color(cr: &Context, color: HexColor) {
    let (r, g, b) = color.to_rgb_f64();
    cr.set_source_rgb(r, g, b);
}

struct MenuPainter<'a> {
    model: &'a MenuModel,
    style: &'a MenuStyle,
    focus: Focus,
    size: Size,
    center: Point,
    circle: f64,
}

impl<'a> MenuPainter<'a> {
    fn new(model: &'a MenuModel, style: &'a MenuStyle, focus: Focus, size: Size) -> Self {
        Self {
            model,
            style,
            focus,
            size,
            center: size.center(),
            circle: size.circle(),
        }
    }

    fn paint(&self, surface: &ImageSurface) -> Result<(), cairo::Error> {
        let cr = Context::new(surface)?;
        set_color(&cr, self.style.background_color);
        cr.paint()?;

        let count = self.model.item_count();
        for (i, label) in self.model.items().iter().enumerate() {
            WedgeRenderer::new(self, i, count, label).draw(&cr)?;
        }
        self.draw_separators(&cr, count)?;
        self.draw_center(&cr)
    }

    /// Background-colored spokes that open a gap between neighbouring
    /// wedge outlines.
    fn draw_separators(&self, cr: &Context, count: NonZeroUsize) -> Result<(), cairo::Error> {
        set_color(cr, self.style.background_color);
        cr.set_line_width(self.style.focus_border + 1.0);
        for i in 0..count.get() {
            let angle = geometry::wedge_start(i, count);
            cr.move_to(self.center.x, self.center.y);
            cr.line_to(
                self.center.x + self.circle * angle.cos(),
                self.center.y + self.circle * angle.sin(),
            );
        }
        cr.stroke()
    }

    fn draw_center(&self, cr: &Context) -> Result<(), cairo::Error> {
        let ring = if self.focus.is_center() {
            self.style.highlight_color
        } else {
            self.style.normal_color
        };
        set_color(cr, ring);
        cr.new_path();
        cr.arc(
            self.center.x,
            self.center.y,
            self.style.center_radius(),
            0.0,
            TAU,
        );
        cr.fill()?;

        set_color(cr, self.style.background_color);
        cr.arc(
            self.center.x,
            self.center.y,
            self.style.center_size / 2.0,
            0.0,
            TAU,
        );
        cr.fill()
    }
}

struct WedgeRenderer<'a> {
    painter: &'a MenuPainter<'a>,
    index: usize,
    count: NonZeroUsize,
    label: &'a ItemLabel,
}

impl<'a> WedgeRenderer<'a> {
    fn new(
        painter: &'a MenuPainter<'a>,
        index: usize,
        count: NonZeroUsize,
        label: &'a ItemLabel,
    ) -> Self {
        Self {
            painter,
            index,
            count,
            label,
        }
    }

    fn draw(&self, cr: &Context) -> Result<(), cairo::Error> {
        self.draw_label(cr)?;
        self.draw_outline(cr)
    }

    fn focused(&self) -> bool {
        self.painter.focus.wedge_index() == Some(self.index)
    }

    fn draw_label(&self, cr: &Context) -> Result<(), cairo::Error> {
        let style = self.painter.style;
        let anchor = geometry::label_anchor(self.index, self.count, self.painter.size);

        set_color(cr, style.normal_color);
        cr.select_font_face(
            &style.font_family,
            cairo::FontSlant::Normal,
            cairo::FontWeight::Normal,
        );
        cr.set_font_size(style.font_size);
        // centered horizontally, top edge on the anchor
        if let Ok(ext) = cr.text_extents(self.label) {
            cr.move_to(
                anchor.x - ext.width() / 2.0 - ext.x_bearing(),
                anchor.y - ext.y_bearing(),
            );
            cr.show_text(self.label)?;
        }
        Ok(())
    }

    fn draw_outline(&self, cr: &Context) -> Result<(), cairo::Error> {
        let style = self.painter.style;
        let (center, circle) = (self.painter.center, self.painter.circle);
        let start = geometry::wedge_start(self.index, self.count);
        let radius = ((circle - style.focus_border) / 2.0).max(0.0);

        set_color(
            cr,
            if self.focused() {
                style.highlight_color
            } else {
                style.normal_color
            },
        );
        cr.set_line_width(style.focus_border);
        cr.new_path();
        cr.move_to(center.x, center.y);
        cr.arc(
            center.x,
            center.y,
            radius,
            start,
            start + geometry::wedge_sweep(self.count),
        );
        cr.close_path();
        cr.stroke()
    }
}

/// Draws `composite` onto `output` rotated by `frame.angle` degrees about the
/// surface center, scaled about that same center and faded by `frame.alpha`.
fn blend(
    composite: &ImageSurface,
    output: &ImageSurface,
    size: Size,
    style: &MenuStyle,
    frame: FrameParams,
) -> Result<(), cairo::Error> {
    let cr = Context::new(output)?;
    set_color(&cr, style.background_color);
    cr.paint()?;

    let (w, h) = (size.width as f64, size.height as f64);
    let center = size.center();

    // cairo applies these last-to-first: rotate about the center, then
    // scale and shift so the center stays put
    cr.identity_matrix();
    if frame.scale > 0.0 {
        let offset = (1.0 - frame.scale) / 2.0;
        cr.translate(offset * w, offset * h);
        cr.scale(frame.scale, frame.scale);
    }
    cr.translate(center.x, center.y);
    cr.rotate(frame.angle.to_radians());
    cr.translate(-center.x, -center.y);

    cr.set_source_surface(composite, 0.0, 0.0)?;
    cr.paint_with_alpha(frame.alpha)
}

/// Makes every pixel that exactly matches the opaque `key` color fully
/// transparent.
fn key_out(surface: &mut ImageSurface, key: HexColor) -> Result<(), cairo::BorrowError> {
    let key = key.argb32();
    let width = surface.width().max(0) as usize;
    let stride = surface.stride().max(0) as usize;
    if stride == 0 {
        return Ok(());
    }

    let mut data = surface.data()?;
    for row in data.chunks_exact_mut(stride) {
        for px in row[..width * 4].chunks_exact_mut(4) {
            if u32::from_ne_bytes([px[0], px[1], px[2], px[3]]) == key {
                px.fill(0);
            }
        }
    }
    Ok(())
}
