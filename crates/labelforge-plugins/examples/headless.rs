//! Headless demo: drive a design session without a UI and print the
//! saved document.

use std::rc::Rc;

use kurbo::{Point, Size};
use labelforge_core::{LabelDesigner, PluginError, PropValue, VectorContent, VectorElement};
use labelforge_plugins::{BarcodePlugin, FnSource, QrcodePlugin, TextboxPlugin};

fn main() {
    env_logger::init();
    log::info!("starting labelforge headless demo");

    pollster::block_on(run());
}

async fn run() {
    let bars = Rc::new(FnSource::new(|value: &str, options| {
        let bar = options.number("width").unwrap_or(1.0);
        let height = options.number("height").unwrap_or(50.0);
        let elements = value
            .char_indices()
            .map(|(i, _)| VectorElement::Rect {
                x: i as f64 * bar * 2.0,
                y: 0.0,
                width: bar,
                height,
            })
            .collect();
        Ok::<_, PluginError>(VectorContent::new(
            elements,
            value.len() as f64 * bar * 2.0,
            height,
        ))
    }));
    let squares = Rc::new(FnSource::new(|_value: &str, options| {
        let width = options.number("width").unwrap_or(100.0);
        Ok::<_, PluginError>(VectorContent::new(
            vec![VectorElement::Rect {
                x: 0.0,
                y: 0.0,
                width,
                height: width,
            }],
            width,
            width,
        ))
    }));

    let mut designer = LabelDesigner::new(Size::new(1024.0, 768.0));
    for result in [
        designer.register_plugin(Rc::new(TextboxPlugin::new())),
        designer.register_plugin(Rc::new(BarcodePlugin::new(bars))),
        designer.register_plugin(Rc::new(QrcodePlugin::new(squares))),
    ] {
        if let Err(err) = result {
            log::error!("plugin registration failed: {err}");
            return;
        }
    }
    designer.load_toolbox();

    let steps = async {
        designer.run_action("btn-barcode").await?;
        designer.apply_setting("width", PropValue::Number(3.0)).await?;
        designer.run_action("btn-textbox").await?;
        designer.apply_setting("text", PropValue::from("Hello label")).await?;
        Ok::<_, labelforge_core::DesignError>(())
    };
    if let Err(err) = steps.await {
        log::error!("demo step failed: {err}");
        return;
    }

    // Exercise the interaction surface a UI would drive.
    designer.resize_viewport(Size::new(1280.0, 800.0));
    designer.scroll(Point::new(640.0, 400.0), -250.0, true);
    designer.pump();

    // Snapshot the scene the way an export/UI layer would.
    let objects: Vec<_> = designer
        .layer()
        .handles_ordered()
        .iter()
        .map(|handle| handle.borrow().clone())
        .collect();
    match serde_json::to_string_pretty(&objects) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("serialization failed: {err}"),
    }
}
