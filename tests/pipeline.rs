use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use sfn_steps::app::App;
use sfn_steps::conf::Settings;
use sfn_steps::event::from_value;
use sfn_steps::step::{run_chain, Step, StepContext, StepError};

fn ctx() -> StepContext {
    StepContext {
        now: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
    }
}

#[test]
fn full_chain_merges_every_step() {
    let event = from_value(json!({"value": 3, "name": "ab", "orderId": "o-1"})).unwrap();
    let output = run_chain(&Step::ALL, event, &ctx()).unwrap();
    assert_eq!(
        Value::Object(output),
        json!({
            "orderId": "o-1",
            "value": 6,
            "name": "ab",
            "transformed_name": "AB",
            "received_at": "2024-03-01T12:00:00+00:00",
            "completed_at": "2024-03-01T12:00:00+00:00",
            "step1_completed": true,
            "step2_completed": true,
            "step3_completed": true
        })
    );
}

#[test]
fn finalize_before_transform_is_out_of_order() {
    let event = from_value(json!({"value": 3})).unwrap();
    let err = run_chain(&[Step::Ingest, Step::Finalize], event, &ctx()).unwrap_err();
    assert_eq!(
        err,
        StepError::OutOfOrder {
            step: Step::Finalize,
            flag: "step2_completed",
        }
    );
}

#[test]
fn deployed_functions_hand_events_along() {
    let functions: Vec<App> = Step::ALL
        .into_iter()
        .map(|step| {
            App::new(Settings {
                step,
                input_filter: None,
                output_filter: None,
            })
            .unwrap()
        })
        .collect();
    let output = functions
        .iter()
        .try_fold(json!({"value": 2.5, "name": "Zoë"}), |payload, app| {
            app.handle(payload, &ctx())
        })
        .unwrap();
    assert_eq!(output["value"], json!(5.0));
    assert_eq!(output["transformed_name"], json!("ZOË"));
    assert_eq!(output["step3_completed"], json!(true));
}
