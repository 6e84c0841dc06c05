//! Conversation engine
//!
//! Drives the admin flows step by step. `start_flow` performs the entry
//! checks (admin flag, city precondition, non-empty venue list) once;
//! `handle` advances the session with one input. All steps before commit
//! are pure accumulation into the session; the commit helpers at the
//! bottom are the only code with side effects.

use sqlx::SqlitePool;
use tracing::{error, info};

use super::session::{ConversationSession, SessionStore, Step};
use super::{BatchReport, Choice, FlowInput, FlowKind, PageInfo, Reply, is_cancel, is_skip};
use crate::db::repository::{lunch, menu_item, place, user};
use crate::ingest::{self, IngestError, SkippedEntry};
use crate::schedule::weekday_name;
use crate::utils::AppError;
use crate::utils::validation::{MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, validate_required_text};
use crate::pagination;
use shared::models::{BusinessLunchCreate, MenuItemCreate, PlaceCreate};

const SCHEDULE_FORMAT: &str = r#"{
  "business_lunch": {
    "time": "12:00 to 15:00",
    "price": 380,
    "days": {
      "monday": { "positions": ["Mimosa salad", "Meatball soup", "Cutlet / potatoes"] },
      "tuesday": { "positions": ["Coleslaw", "Chicken noodles", "Schnitzel / potatoes"] }
    },
    "additional": "Fruit drink + bread"
  }
}"#;

const MENU_FORMAT: &str = r#"{
  "menu_items": [
    { "name": "SPATEN", "description": "pale filtered lager", "volume": "500 ml", "price": 290 },
    { "name": "HOEGAARDEN", "description": "unfiltered lager", "volume": "500 ml", "price": 290 }
  ]
}"#;

/// What one input did to the session
enum Outcome {
    /// Session stays active (advanced or re-prompting)
    Continue(Reply),
    /// Session is over (committed, failed or terminal)
    Finished(Reply),
}

/// Transport-agnostic driver of the admin flows
pub struct ConversationEngine {
    pool: SqlitePool,
    sessions: SessionStore,
    /// Cities venues can belong to
    cities: Vec<String>,
    /// Venues per page on selection steps
    select_page_size: i64,
}

impl ConversationEngine {
    pub fn new(pool: SqlitePool, cities: Vec<String>, select_page_size: i64) -> Self {
        Self {
            pool,
            sessions: SessionStore::new(),
            cities,
            select_page_size,
        }
    }

    /// Enter a flow. Authorization and preconditions are checked here,
    /// once; they are not re-checked per step.
    pub async fn start_flow(&self, user_id: i64, flow: FlowKind) -> Result<Reply, AppError> {
        if !user::is_admin(&self.pool, user_id).await? {
            return Err(AppError::forbidden(format!(
                "Only administrators can {}",
                flow.label()
            )));
        }

        match flow {
            FlowKind::AddPlace => {
                let session = ConversationSession::new(user_id, flow, Step::PlaceName);
                self.sessions.put(session);
                Ok(prompt("Adding a new venue. Enter the venue name:"))
            }
            FlowKind::AddLunch | FlowKind::AddMenu => {
                let city = user::city_of(&self.pool, user_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::business_rule("Select a city first before running admin flows")
                    })?;
                if place::count_by_city(&self.pool, &city).await? == 0 {
                    return Err(AppError::business_rule(format!(
                        "No venues in {city} yet. Add a venue first."
                    )));
                }

                let step = match flow {
                    FlowKind::AddLunch => Step::LunchSelectPlace,
                    _ => Step::MenuSelectPlace,
                };
                let mut session = ConversationSession::new(user_id, flow, step);
                session.set("city", city);
                let reply = self.place_selection_prompt(&mut session).await?;
                self.sessions.put(session);
                Ok(reply)
            }
        }
    }

    /// Feed one input into the user's active flow.
    pub async fn handle(&self, user_id: i64, input: FlowInput) -> Result<Reply, AppError> {
        let Some(mut session) = self.sessions.get(user_id) else {
            return Ok(Reply::NoActiveFlow);
        };

        // Cancellation is recognized at every free-text step
        if let FlowInput::Text { text } = &input {
            if is_cancel(text) {
                self.sessions.remove(user_id);
                info!(user_id, flow = ?session.flow, "Flow cancelled");
                return Ok(Reply::Cancelled);
            }
        }

        match self.advance(&mut session, input).await? {
            Outcome::Continue(reply) => {
                self.sessions.put(session);
                Ok(reply)
            }
            Outcome::Finished(reply) => {
                self.sessions.remove(user_id);
                Ok(reply)
            }
        }
    }

    /// Explicit cancellation (the transport's cancel button).
    pub fn cancel(&self, user_id: i64) -> Reply {
        match self.sessions.remove(user_id) {
            Some(session) => {
                info!(user_id, flow = ?session.flow, "Flow cancelled");
                Reply::Cancelled
            }
            None => Reply::NoActiveFlow,
        }
    }

    /// The transition table: `(current step, input) -> outcome`.
    async fn advance(
        &self,
        session: &mut ConversationSession,
        input: FlowInput,
    ) -> Result<Outcome, AppError> {
        match (session.step, input) {
            // ── Add-Venue ───────────────────────────────────────────
            (Step::PlaceName, FlowInput::Text { text }) => {
                let text = text.trim();
                if let Err(e) = validate_required_text(text, "Venue name", MAX_NAME_LEN) {
                    return Ok(Outcome::Continue(Reply::Invalid { text: e.to_string() }));
                }
                session.set("name", text);
                session.step = Step::PlaceAddress;
                Ok(Outcome::Continue(prompt("Enter the venue address:")))
            }
            (Step::PlaceAddress, FlowInput::Text { text }) => {
                let text = text.trim();
                if let Err(e) = validate_required_text(text, "Venue address", MAX_ADDRESS_LEN) {
                    return Ok(Outcome::Continue(Reply::Invalid { text: e.to_string() }));
                }
                session.set("address", text);
                session.step = Step::PlaceCategory;
                Ok(Outcome::Continue(prompt(
                    "Enter the venue category (e.g. 'cafe', 'restaurant', 'bar'):",
                )))
            }
            (Step::PlaceCategory, FlowInput::Text { text }) => {
                let text = text.trim();
                if let Err(e) = validate_required_text(text, "Venue category", MAX_NAME_LEN) {
                    return Ok(Outcome::Continue(Reply::Invalid { text: e.to_string() }));
                }
                session.set("category", text);
                session.step = Step::PlaceCity;
                Ok(Outcome::Continue(Reply::Prompt {
                    text: "Choose the venue city:".to_string(),
                    choices: self
                        .cities
                        .iter()
                        .map(|c| Choice {
                            id: c.clone(),
                            label: c.clone(),
                        })
                        .collect(),
                    page: None,
                }))
            }
            (Step::PlaceCity, FlowInput::Select { id }) => Ok(self.accept_city(session, &id)),
            (Step::PlaceCity, FlowInput::Text { text }) => Ok(self.accept_city(session, &text)),
            (Step::PlacePhoto, FlowInput::Photo { file_id }) => {
                session.set("photo_id", file_id);
                session.step = Step::PlaceComment;
                Ok(Outcome::Continue(prompt(
                    "Enter an admin comment (or 'skip'):",
                )))
            }
            (Step::PlacePhoto, FlowInput::Text { text }) => {
                if is_skip(&text) {
                    session.step = Step::PlaceComment;
                    Ok(Outcome::Continue(prompt(
                        "Enter an admin comment (or 'skip'):",
                    )))
                } else {
                    Ok(Outcome::Continue(Reply::Invalid {
                        text: "Send a photo, or 'skip' if you have none.".to_string(),
                    }))
                }
            }
            (Step::PlaceComment, FlowInput::Text { text }) => {
                let comment = if is_skip(&text) {
                    None
                } else {
                    let text = text.trim();
                    if text.len() > MAX_NOTE_LEN {
                        return Ok(Outcome::Continue(Reply::Invalid {
                            text: format!("Comment is too long (max {MAX_NOTE_LEN} chars)."),
                        }));
                    }
                    Some(text.to_string())
                };
                self.commit_place(session, comment).await
            }

            // ── Venue selection (both ingestion flows) ──────────────
            (Step::LunchSelectPlace | Step::MenuSelectPlace, FlowInput::Page { page }) => {
                session.page = page;
                let reply = self.place_selection_prompt(session).await?;
                Ok(Outcome::Continue(reply))
            }
            (Step::LunchSelectPlace, FlowInput::Select { id }) => {
                self.accept_place_selection(session, &id, Step::LunchPayload)
                    .await
            }
            (Step::MenuSelectPlace, FlowInput::Select { id }) => {
                self.accept_place_selection(session, &id, Step::MenuCategory)
                    .await
            }

            // ── Add-Menu-Items ──────────────────────────────────────
            (Step::MenuCategory, FlowInput::Text { text }) => {
                let text = text.trim();
                if let Err(e) = validate_required_text(text, "Category", MAX_NAME_LEN) {
                    return Ok(Outcome::Continue(Reply::Invalid { text: e.to_string() }));
                }
                session.set("menu_category", text);
                session.step = Step::MenuPayload;
                Ok(Outcome::Continue(prompt(format!(
                    "Selected category: {text}\n\nSend the menu items as JSON, for example:\n{MENU_FORMAT}\n\nOr send 'cancel' to abort."
                ))))
            }

            // ── Commits ─────────────────────────────────────────────
            (Step::LunchPayload, FlowInput::Text { text }) => {
                self.commit_schedule(session, &text).await
            }
            (Step::MenuPayload, FlowInput::Text { text }) => {
                self.commit_menu(session, &text).await
            }

            // Anything else does not fit the current step
            _ => Ok(Outcome::Continue(Reply::Invalid {
                text: "This step expects a different kind of input.".to_string(),
            })),
        }
    }

    fn accept_city(&self, session: &mut ConversationSession, city: &str) -> Outcome {
        let city = city.trim();
        if !self.cities.iter().any(|c| c == city) {
            return Outcome::Continue(Reply::Invalid {
                text: "Please choose one of the available cities.".to_string(),
            });
        }
        session.set("city", city);
        session.step = Step::PlacePhoto;
        Outcome::Continue(prompt("Send a venue photo (or 'skip' if you have none):"))
    }

    /// Render the current page of the venue selection step.
    async fn place_selection_prompt(
        &self,
        session: &mut ConversationSession,
    ) -> Result<Reply, AppError> {
        let city = session
            .get("city")
            .ok_or_else(|| AppError::internal("Session is missing the city field"))?
            .to_string();

        // Recompute the total on every call; clamp the cursor against it
        let total = place::count_by_city(&self.pool, &city).await?;
        let page = pagination::clamp_page(session.page, total, self.select_page_size);
        session.page = page;
        let window = pagination::paginate(total, page, self.select_page_size);

        let places =
            place::find_by_city(&self.pool, &city, self.select_page_size, window.offset).await?;
        let text = match session.flow {
            FlowKind::AddLunch => "Choose a venue for the business lunch:",
            _ => "Choose a venue for the menu items:",
        };
        Ok(Reply::Prompt {
            text: text.to_string(),
            choices: places
                .iter()
                .map(|p| Choice {
                    id: p.id.to_string(),
                    label: format!("{} ({})", p.name, p.address),
                })
                .collect(),
            page: Some(PageInfo {
                page,
                page_count: window.page_count,
            }),
        })
    }

    async fn accept_place_selection(
        &self,
        session: &mut ConversationSession,
        id: &str,
        next: Step,
    ) -> Result<Outcome, AppError> {
        let Ok(place_id) = id.parse::<i64>() else {
            return Ok(Outcome::Continue(Reply::Invalid {
                text: "Choose a venue from the list.".to_string(),
            }));
        };
        let Some(selected) = place::find_by_id(&self.pool, place_id).await? else {
            return Ok(Outcome::Finished(Reply::Failed {
                text: "Venue not found.".to_string(),
            }));
        };

        session.set("place_id", place_id.to_string());
        session.set("place_name", selected.name.clone());
        session.step = next;

        let text = match next {
            Step::LunchPayload => format!(
                "Selected venue: {} ({})\n\nSend the business lunch as JSON, for example:\n{SCHEDULE_FORMAT}\n\nOr send 'cancel' to abort.",
                selected.name, selected.address
            ),
            _ => format!(
                "Selected venue: {} ({})\n\nEnter a common category for the items (e.g. 'drinks', 'desserts'):",
                selected.name, selected.address
            ),
        };
        Ok(Outcome::Continue(prompt(text)))
    }

    // ── Commits: the only steps with side effects ───────────────────

    async fn commit_place(
        &self,
        session: &ConversationSession,
        admin_comment: Option<String>,
    ) -> Result<Outcome, AppError> {
        let field = |name: &str| {
            session
                .get(name)
                .map(str::to_string)
                .ok_or_else(|| AppError::internal(format!("Session is missing the {name} field")))
        };
        let data = PlaceCreate {
            name: field("name")?,
            address: field("address")?,
            category: field("category")?,
            city: field("city")?,
            photo_id: session.get("photo_id").map(str::to_string),
            admin_comment,
        };

        match place::create(&self.pool, data).await {
            Ok(created) => {
                info!(place_id = created.id, name = %created.name, "Venue added");
                Ok(Outcome::Finished(Reply::Committed {
                    report: BatchReport {
                        flow: FlowKind::AddPlace,
                        title: format!("Venue '{}' added (id {})", created.name, created.id),
                        added: vec![created.name],
                        skipped: Vec::new(),
                    },
                }))
            }
            Err(e) => {
                error!(error = %e, "Failed to add venue");
                Ok(Outcome::Finished(Reply::Failed {
                    text: format!("Could not add the venue: {e}"),
                }))
            }
        }
    }

    async fn commit_schedule(
        &self,
        session: &ConversationSession,
        payload: &str,
    ) -> Result<Outcome, AppError> {
        let place_id = session
            .get("place_id")
            .and_then(|id| id.parse::<i64>().ok())
            .ok_or_else(|| AppError::internal("Session is missing the place_id field"))?;
        let place_name = session.get("place_name").unwrap_or_default().to_string();

        let parsed = match ingest::parse_schedule(payload) {
            Ok(parsed) => parsed,
            Err(e) => return Ok(Outcome::Finished(payload_failure(e))),
        };

        // The venue can disappear between selection and commit
        if place::find_by_id(&self.pool, place_id).await?.is_none() {
            return Ok(Outcome::Finished(Reply::Failed {
                text: "Venue not found.".to_string(),
            }));
        }

        // One insert per day; a failing day is reported and the batch
        // continues
        let mut added = Vec::new();
        let mut skipped = parsed.skipped.clone();
        for day in &parsed.days {
            let data = BusinessLunchCreate {
                place_id,
                weekday: day.weekday,
                price: parsed.price,
                start_time: parsed.start_time.clone(),
                end_time: parsed.end_time.clone(),
                description: (!day.description.is_empty()).then(|| day.description.clone()),
            };
            match lunch::create(&self.pool, data).await {
                Ok(row) => {
                    info!(
                        place_id,
                        lunch_id = row.id,
                        weekday = day.weekday,
                        "Business lunch day added"
                    );
                    added.push(weekday_name(day.weekday).to_string());
                }
                Err(e) => {
                    error!(place_id, weekday = day.weekday, error = %e, "Failed to add business lunch day");
                    skipped.push(SkippedEntry::new(
                        day.day_name.clone(),
                        format!("could not add: {e}"),
                    ));
                }
            }
        }

        Ok(Outcome::Finished(Reply::Committed {
            report: BatchReport {
                flow: FlowKind::AddLunch,
                title: format!(
                    "Business lunch for '{place_name}': {} - {}, price {}",
                    parsed.start_time, parsed.end_time, parsed.price
                ),
                added,
                skipped,
            },
        }))
    }

    async fn commit_menu(
        &self,
        session: &ConversationSession,
        payload: &str,
    ) -> Result<Outcome, AppError> {
        let place_id = session
            .get("place_id")
            .and_then(|id| id.parse::<i64>().ok())
            .ok_or_else(|| AppError::internal("Session is missing the place_id field"))?;
        let place_name = session.get("place_name").unwrap_or_default().to_string();
        let category = session
            .get("menu_category")
            .ok_or_else(|| AppError::internal("Session is missing the menu_category field"))?
            .to_string();

        let parsed = match ingest::parse_menu(payload) {
            Ok(parsed) => parsed,
            Err(e) => return Ok(Outcome::Finished(payload_failure(e))),
        };

        if place::find_by_id(&self.pool, place_id).await?.is_none() {
            return Ok(Outcome::Finished(Reply::Failed {
                text: "Venue not found.".to_string(),
            }));
        }

        let mut added = Vec::new();
        let mut skipped = parsed.skipped.clone();
        for item in &parsed.items {
            let data = MenuItemCreate {
                place_id,
                name: item.name.clone(),
                price: item.price,
                category: category.clone(),
                description: item.description.clone(),
            };
            match menu_item::create(&self.pool, data).await {
                Ok(row) => {
                    info!(place_id, menu_item_id = row.id, name = %row.name, "Menu item added");
                    added.push(format!("{} ({})", item.name, item.price));
                }
                Err(e) => {
                    error!(place_id, name = %item.name, error = %e, "Failed to add menu item");
                    skipped.push(SkippedEntry::new(
                        item.name.clone(),
                        format!("could not add: {e}"),
                    ));
                }
            }
        }

        Ok(Outcome::Finished(Reply::Committed {
            report: BatchReport {
                flow: FlowKind::AddMenu,
                title: format!("Menu items for '{place_name}', category '{category}'"),
                added,
                skipped,
            },
        }))
    }
}

fn prompt(text: impl Into<String>) -> Reply {
    Reply::Prompt {
        text: text.into(),
        choices: Vec::new(),
        page: None,
    }
}

/// Fatal payload errors reset the session; the user is told to resend.
fn payload_failure(e: IngestError) -> Reply {
    let text = match &e {
        IngestError::Syntax(_) => format!("{e}. Check the JSON syntax and resend the payload."),
        IngestError::Payload(_) => format!("{e}. Fix the payload and resend it."),
    };
    Reply::Failed { text }
}
