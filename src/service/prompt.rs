//! Extraction instruction sent to the model alongside the screenshot.
//!
//! The template carries the current wall-clock instant so the model can
//! resolve relative dates ("next Tuesday") visible in the screenshot, and
//! repeats the response shape in prose to bias the model toward it.

use chrono::{Local, NaiveDateTime};

/// Placeholder substituted with the wall-clock instant at call time.
const CURRENT_DATETIME: &str = "{current_datetime}";

/// Instruction template for calendar-event extraction.
const TEMPLATE: &str = r#" The current date and time is: {current_datetime}.

Analyze the provided screenshot and extract the following information:

summary: A brief summary of the event.
location: The location of the event.
start time: The start date and time of the event in YYYY-MM-DDTHH:MM:SS format. Assume the event starts in the future.
end time: The end date and time of the event in YYYY-MM-DDTHH:MM:SS format. Calculate this using the duration, if no duration is mentioned, assume the event is an hour long.
Ensure the start and end objects include the correct timeZone based on the information in the screenshot.
duration: The duration of the event in minutes. This could be also written as mins.Use this to calculate the end time if provided.
Ensure the start and end objects include the correct timeZone based on the information in the screenshot.
description: A short description of the event.

The response should have the following schema:

{
    "type": "OBJECT",
    "properties": {
        "summary": {"type": "STRING"},
        "location": {"type": "STRING"},
        "description": {"type": "STRING"},
        "start": {"type": "STRING"},
        "end": {"type": "STRING"}
    }
}

"#;

/// Renders the instruction with the given instant (ISO 8601, no offset).
#[must_use]
pub fn instruction(now: NaiveDateTime) -> String {
    TEMPLATE.replace(
        CURRENT_DATETIME,
        &now.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
    )
}

/// Renders the instruction with the process-local wall clock.
#[must_use]
pub fn instruction_now() -> String {
    instruction(Local::now().naive_local())
}
