use crate::constants::PANEL_ID;
use crate::dom;
use crate::media::SharedStage;
use wasm_bindgen::JsCast;
use waveflag_core::{Control, ControlKind, ControlValue};
use web_sys as web;

const PANEL_STYLE: &str = "position:fixed;top:8px;right:8px;padding:8px 10px;\
background:rgba(20,20,20,0.85);color:#ddd;font:12px monospace;border-radius:4px;";
const ROW_STYLE: &str = "display:flex;align-items:center;gap:6px;margin:3px 0;";

fn js(e: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

fn panel_root(document: &web::Document) -> anyhow::Result<web::Element> {
    if let Some(el) = document.get_element_by_id(PANEL_ID) {
        return Ok(el);
    }
    let el = document.create_element("div").map_err(js)?;
    el.set_id(PANEL_ID);
    el.set_attribute("style", PANEL_STYLE).map_err(js)?;
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("document has no body"))?;
    body.append_child(&el).map_err(js)?;
    Ok(el)
}

fn make_input(
    document: &web::Document,
    control: &Control,
    value: &ControlValue,
) -> anyhow::Result<web::HtmlInputElement> {
    let input: web::HtmlInputElement = document
        .create_element("input")
        .map_err(js)?
        .dyn_into()
        .map_err(|_| anyhow::anyhow!("input element has unexpected type"))?;
    match control.kind {
        ControlKind::Slider { min, max, step } => {
            input.set_type("range");
            input.set_min(&min.to_string());
            input.set_max(&max.to_string());
            input.set_step(&step.to_string());
        }
        ControlKind::Color => input.set_type("color"),
    }
    input.set_value(&value.to_input_string());
    Ok(input)
}

/// Build one labeled input per control. Edits go straight into the live
/// uniforms through `Stage::apply_control`.
pub fn build_panel(document: &web::Document, stage: &SharedStage) -> anyhow::Result<()> {
    let root = panel_root(document)?;
    let rows: Vec<(Control, ControlValue)> = {
        let s = stage.borrow();
        let panel = &s.scene.panel;
        panel
            .controls()
            .iter()
            .map(|c| (*c, panel.read(c, &s.scene.uniforms)))
            .collect()
    };

    for (control, value) in &rows {
        let row = document.create_element("label").map_err(js)?;
        row.set_attribute("style", ROW_STYLE).map_err(js)?;
        let title = document.create_element("span").map_err(js)?;
        title.set_text_content(Some(control.name));
        let input = make_input(document, control, value)?;
        let readout = document.create_element("span").map_err(js)?;
        readout.set_text_content(Some(&value.to_input_string()));

        let stage = stage.clone();
        let name = control.name;
        let source = input.clone();
        let shown = readout.clone();
        dom::add_listener(&input, "input", move |_ev: web::Event| {
            let applied = stage.borrow_mut().apply_control(name, &source.value());
            match applied {
                Ok(v) => shown.set_text_content(Some(&v.to_input_string())),
                Err(e) => log::warn!("[panel] {}", e),
            }
        });

        row.append_child(&title).map_err(js)?;
        row.append_child(&input).map_err(js)?;
        row.append_child(&readout).map_err(js)?;
        root.append_child(&row).map_err(js)?;
    }
    log::info!("[panel] {} controls", rows.len());
    Ok(())
}
