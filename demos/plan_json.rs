//! Assembles a layout from a JSON plan.
//!
//! The plan describes the container tree; the widgets it arranges are
//! created up front and bound by slot name. Editing the JSON is enough
//! to rearrange the shell without touching the composition code.
//!
//! ```bash
//! cargo run --example plan_json
//! ```

use furnish::{Bindings, HeadlessToolkit, Plan, assemble};

const SHELL_PLAN: &str = r#"{
  "column": {
    "children": [
      {
        "horizontal_split": {
          "ratio": 0.25,
          "children": [
            {"slot": "nav"},
            {
              "tabs": {
                "pages": [
                  {"label": "Editor", "child": {"slot": "editor"}},
                  {"label": "Terminal", "child": {"slot": "terminal"}}
                ]
              }
            }
          ]
        }
      },
      {
        "row": {
          "trailing_spacer": true,
          "children": [{"slot": "status"}]
        }
      }
    ]
  }
}"#;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let plan: Plan = serde_json::from_str(SHELL_PLAN)?;

    let mut toolkit = HeadlessToolkit::new();
    let bindings: Bindings = ["nav", "editor", "terminal", "status"]
        .iter()
        .map(|slot| (slot.to_string(), toolkit.create_widget(*slot)))
        .collect();

    let root = assemble(&mut toolkit, &plan, &bindings)?;
    print!("{}", toolkit.outline(root.id()));

    // Slots the plan names but the bindings do not cover are rejected
    // before anything is built.
    let mut incomplete = bindings.clone();
    incomplete.remove("terminal");
    match assemble(&mut toolkit, &plan, &incomplete) {
        Err(err) => println!("\nrebinding without terminal: {err}"),
        Ok(_) => unreachable!("assembly requires every slot to be bound"),
    }
    Ok(())
}
