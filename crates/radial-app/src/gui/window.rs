use gtk::gdk;
use gtk4 as gtk;

pub const DEFAULT_WINDOW_SIZE: i32 = 400;

/// The keyed-out background only shows through if GTK paints nothing
/// behind the drawing area.
pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.radial-window, .radial-drawing-area {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
