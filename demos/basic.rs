//! Standalone demo: opens a window with the color picker.

use floem::prelude::*;
use floem::window::WindowConfig;
use floem_hsva::{hsva_picker, ColorFormat, Picker, PickerOptions};

fn main() {
    let picker = Picker::new(PickerOptions {
        value: Some("#6bc30d".to_string()),
        format: ColorFormat::Rgb,
        alpha: true,
        change: Some(Box::new(|color, _| println!("picked {color}"))),
    });

    floem::Application::new()
        .window(
            move |_| {
                hsva_picker(&picker).on_event_stop(floem::event::EventListener::WindowClosed, |_| {
                    floem::quit_app()
                })
            },
            Some(
                WindowConfig::default()
                    .size((232.0, 220.0))
                    .title("floem-hsva"),
            ),
        )
        .run();
}
