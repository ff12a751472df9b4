use log::debug;

use super::intent::{
    extract_origin_dest, extract_permit_and_campus, guess_permit_name, has_trip_phrase,
    mentions_bus, mentions_parking, tokens,
};
use super::session::{Mode, SessionContext};
use crate::CampusModel;
use crate::parking::describe_parking;
use crate::routing::describe_plan;

pub const EMPTY_MESSAGE_PROMPT: &str =
    "Please type a question about Rutgers **parking** or **buses**.";

pub const DEFAULT_FALLBACK_MESSAGE: &str = "I couldn't answer that directly from the RU-PATH JSON data. \
     Please check the official Rutgers Parking & Transportation website \
     or the Rutgers mobile app for the latest info.";

const PARKING_PROMPT: &str = "Tell me your permit type and campus, for example:\n\
     - \"Livingston Commuter permit on Busch\"\n\
     - \"College Ave Commuter permit on Livingston\"";

const BUS_PROMPT: &str = "For bus routes, tell me both your starting building and destination, for example:\n\
     - \"From Hill Center to Livingston Student Center\"\n\
     - \"From The Yard to Busch Student Center\"";

const BOTH_PROMPT: &str = "Great, I can help with **both parking and buses**.\n\n\
     Ask one question at a time, for example:\n\
     - Parking: \"I have a Livingston Commuter permit, where can I park on Busch?\"\n\
     - Bus: \"From Hill Center to The Yard, which bus should I take?\"";

const HELP_TEXT: &str = "Hi! I can help with:\n\
     - **Parking rules** (permits, allowed lots, time windows)\n\
     - **Bus routes** between buildings or major stops\n\n\
     Say **\"parking\"**, **\"bus\"**, or **\"both\"** to get started.\n\
     Or ask something like:\n\
     - \"Where can I park with a Livingston Commuter permit on Busch?\"\n\
     - \"From Hill Center to The Yard, which bus should I take?\"";

const BUS_USAGE: &str = "For bus routes, tell me both your starting building and destination, for example:\n\
     \"From Hill Center to Livingston Student Center\".";

const PARKING_USAGE: &str = "Tell me your permit type and campus, for example:\n\
     \"Livingston Commuter permit on Busch\" or\n\
     \"College Ave Commuter - where can I park on Livingston?\"";

/// Outcome of one chat turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Answered from the datasets
    Answer(String),
    /// Not answerable from the datasets. `hint` is the best local answer, if any.
    Fallback { hint: Option<String> },
}

impl Reply {
    /// Text to show when no other fallback is available
    pub fn into_local_text(self) -> String {
        match self {
            Reply::Answer(text) => text,
            Reply::Fallback { hint } => {
                hint.unwrap_or_else(|| DEFAULT_FALLBACK_MESSAGE.to_string())
            }
        }
    }
}

/// Answers parking and bus questions from a [`CampusModel`]
#[derive(Debug, Clone, Copy)]
pub struct Assistant<'a> {
    model: &'a CampusModel,
}

impl<'a> Assistant<'a> {
    pub fn new(model: &'a CampusModel) -> Self {
        Self { model }
    }

    pub fn reply(&self, ctx: &mut SessionContext, message: &str) -> Reply {
        let text = message.trim();
        if text.is_empty() {
            return Reply::Answer(EMPTY_MESSAGE_PROMPT.to_string());
        }

        let lower = text.to_lowercase();
        let tokens = tokens(&lower);

        if let Some((mode, prompt)) = mode_command(&lower) {
            debug!("Session mode set to {mode:?}");
            ctx.mode = Some(mode);
            return Reply::Answer(prompt.to_string());
        }

        let bus_like = mentions_bus(&tokens) || has_trip_phrase(&lower);
        let parking_like = mentions_parking(&tokens);

        let intent = match (bus_like, parking_like) {
            (true, false) => Some(Mode::Bus),
            (false, true) => Some(Mode::Parking),
            (true, true) => ctx.mode.or(Some(Mode::Parking)),
            (false, false) => ctx.mode,
        };

        let Some(intent) = intent else {
            return Reply::Answer(HELP_TEXT.to_string());
        };
        if matches!(lower.as_str(), "help" | "menu" | "options") {
            return Reply::Answer(HELP_TEXT.to_string());
        }

        ctx.mode = Some(intent);

        match intent {
            Mode::Bus => self.bus_reply(text),
            Mode::Parking => self.parking_reply(&lower, tokens.contains("commuter")),
            Mode::Both => Reply::Fallback { hint: None },
        }
    }

    fn bus_reply(&self, text: &str) -> Reply {
        match extract_origin_dest(text) {
            (Some(origin), Some(dest)) => {
                let plan = self.model.planner().plan(&origin, &dest);
                match plan {
                    Ok(_) => Reply::Answer(describe_plan(&plan)),
                    Err(err) => Reply::Fallback {
                        hint: Some(err.to_string()),
                    },
                }
            }
            (None, None) => Reply::Answer(BUS_USAGE.to_string()),
            (origin, _) => {
                let missing = if origin.is_none() {
                    "origin"
                } else {
                    "destination"
                };
                Reply::Answer(format!(
                    "Tell me your {missing} as well, for example:\n\"From Hill Center to The Yard\"."
                ))
            }
        }
    }

    fn parking_reply(&self, lower: &str, said_commuter: bool) -> Reply {
        let parking = &self.model.parking;
        let (mut permit, campus) = extract_permit_and_campus(lower, parking);
        if permit.is_none() && said_commuter {
            permit = guess_permit_name(lower, parking);
        }

        let Some(permit) = permit else {
            return Reply::Answer(PARKING_USAGE.to_string());
        };

        match parking.find_parking(permit, campus) {
            Ok(answer) => Reply::Answer(describe_parking(&answer)),
            Err(err) => Reply::Fallback {
                hint: Some(err.to_string()),
            },
        }
    }
}

fn mode_command(lower: &str) -> Option<(Mode, &'static str)> {
    match lower {
        "parking" | "parking question" | "park" => Some((Mode::Parking, PARKING_PROMPT)),
        "bus" | "bus question" | "buses" => Some((Mode::Bus, BUS_PROMPT)),
        "both" | "parking and bus" | "bus and parking" => Some((Mode::Both, BOTH_PROMPT)),
        _ => None,
    }
}
