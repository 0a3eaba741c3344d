//! Conversation engine.
//!
//! Routes each inbound message to a flow and returns the reply:
//! - Commands and menu buttons start flows (or run them at once when the
//!   arguments are inline)
//! - Free text answers the user's pending `DialogStep`
//!
//! Both paths end in `Assistant::advance`, the only place a step is
//! resolved, so an inline `/log_water 300` and a prompted "300" mutate the
//! session identically and produce the same reply.

use crate::command::{Command, Inbound};
use crate::food::FoodLookup;
use crate::progress::ProgressReport;
use crate::store::SessionStore;
use crate::weather::WeatherLookup;
use crate::{
    catalog, dialog, goals, messages, DialogStep, FoodResolution, PendingFood, ProfileDraft,
    ProfileStep, Reply, UserId, UserSession,
};

/// The tracking assistant: session store plus external lookups
#[derive(Clone)]
pub struct Assistant {
    store: SessionStore,
    weather: WeatherLookup,
    food: FoodLookup,
}

impl Assistant {
    pub fn new(store: SessionStore, weather: WeatherLookup, food: FoodLookup) -> Self {
        Self {
            store,
            weather,
            food,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Handle one raw inbound message from a user
    pub async fn handle_message(&self, user: UserId, text: &str) -> Reply {
        match Inbound::parse(text) {
            Inbound::Command(command) => self.handle_command(user, command).await,
            Inbound::UnknownCommand(name) => Reply::text(messages::unknown_command(&name)),
            Inbound::Text(text) => self.handle_text(user, &text).await,
        }
    }

    /// Handle an explicit command or menu button
    ///
    /// Commands that start a flow replace any pending step; `start`, `help`
    /// and `check_progress` leave it in place.
    pub async fn handle_command(&self, user: UserId, command: Command) -> Reply {
        tracing::debug!(%user, ?command, "Handling command");

        match command {
            Command::Start => Reply::text(messages::start()).with_menu(),
            Command::Help => Reply::text(messages::help()),
            Command::SetProfile => {
                let slot = self.store.get_or_create(user).await;
                slot.lock().await.step = DialogStep::Profile(ProfileDraft::default());
                Reply::text(messages::profile_start())
            }
            Command::Cancel => self.cancel(user).await,
            Command::LogWater(args) => {
                self.start_flow(user, DialogStep::Water, args, messages::water_prompt)
                    .await
            }
            Command::LogFood(args) => {
                self.start_flow(user, DialogStep::FoodName, args, messages::food_prompt)
                    .await
            }
            Command::LogWorkout(args) => {
                self.start_flow(user, DialogStep::Workout, args, messages::workout_prompt)
                    .await
            }
            Command::CheckProgress => self.check_progress(user).await,
        }
    }

    /// Route free text to the user's pending step
    async fn handle_text(&self, user: UserId, text: &str) -> Reply {
        let Some(slot) = self.store.get(user).await else {
            return Reply::text(messages::use_buttons()).with_menu();
        };
        let mut session = slot.lock().await;
        let step = std::mem::take(&mut session.step);
        self.advance(user, &mut session, step, text).await
    }

    /// Start a logging flow: run it with inline arguments, or prompt and
    /// park the session on `step` until the answer arrives
    async fn start_flow(
        &self,
        user: UserId,
        step: DialogStep,
        args: Option<String>,
        prompt: fn() -> String,
    ) -> Reply {
        let Some(slot) = self.store.get(user).await else {
            return Reply::text(messages::profile_required());
        };
        let mut session = slot.lock().await;
        if !session.is_configured() {
            return Reply::text(messages::profile_required());
        }

        match args {
            Some(args) => self.advance(user, &mut session, step, &args).await,
            None => {
                session.step = step;
                Reply::text(prompt())
            }
        }
    }

    /// Resolve one dialog step with the user's input
    ///
    /// The caller has already taken `step` out of the session; every branch
    /// stores the next step (the same one on invalid input, `Idle` once the
    /// flow resolves).
    async fn advance(
        &self,
        user: UserId,
        session: &mut UserSession,
        step: DialogStep,
        input: &str,
    ) -> Reply {
        if !matches!(step, DialogStep::Idle | DialogStep::Profile(_)) && !session.is_configured() {
            session.step = DialogStep::Idle;
            return Reply::text(messages::profile_required());
        }

        match step {
            DialogStep::Idle => Reply::text(messages::use_buttons()).with_menu(),
            DialogStep::Profile(draft) => self.advance_profile(user, session, draft, input).await,
            DialogStep::Water => log_water(user, session, input),
            DialogStep::FoodName => self.resolve_food(session, input).await,
            DialogStep::FoodAmount(pending) => log_food(user, session, pending, input),
            DialogStep::Workout => log_workout(user, session, input),
        }
    }

    async fn advance_profile(
        &self,
        user: UserId,
        session: &mut UserSession,
        mut draft: ProfileDraft,
        input: &str,
    ) -> Reply {
        let step = draft.current_step();
        let accepted = match step {
            ProfileStep::Weight => dialog::parse_weight(input).map(|weight| {
                draft.weight_kg = Some(weight);
                format!("Вес: {} кг", weight)
            }),
            ProfileStep::Height => dialog::parse_height(input).map(|height| {
                draft.height_cm = Some(height);
                format!("Рост: {} см", height)
            }),
            ProfileStep::Age => dialog::parse_age(input).map(|age| {
                draft.age = Some(age);
                format!("Возраст: {} лет", age)
            }),
            ProfileStep::Gender => dialog::parse_gender(input).map(|gender| {
                draft.gender = Some(gender);
                format!("Пол: {}", gender.label())
            }),
            ProfileStep::Activity => dialog::parse_activity(input).map(|minutes| {
                draft.activity_minutes = Some(minutes);
                format!("Активность: {} мин", minutes)
            }),
            ProfileStep::City => match dialog::parse_city(input) {
                Ok(city) => return self.complete_profile(user, session, draft, city).await,
                Err(e) => Err(e),
            },
        };

        let reply = match accepted {
            Ok(confirmation) => messages::profile_accepted(confirmation, draft.current_step()),
            Err(e) => messages::profile_invalid(step, &e),
        };
        session.step = DialogStep::Profile(draft);
        Reply::text(reply)
    }

    /// Commit the profile: weather, goals, and a full reset of the totals
    async fn complete_profile(
        &self,
        user: UserId,
        session: &mut UserSession,
        draft: ProfileDraft,
        city: String,
    ) -> Reply {
        let Some(profile) = draft.complete(city) else {
            // Unreachable through the ordered steps; restart rather than commit
            session.step = DialogStep::Profile(ProfileDraft::default());
            return Reply::text(messages::profile_start());
        };

        let notice = messages::weather_check(&profile.city);
        let reading = self.weather.lookup(&profile.city).await;

        session.water_goal_ml = goals::water_goal(
            profile.weight_kg,
            profile.activity_minutes,
            reading.temperature_c,
        );
        session.calorie_goal_kcal = goals::calorie_goal(
            profile.weight_kg,
            profile.height_cm,
            profile.age,
            profile.gender,
            profile.activity_minutes,
        );
        session.temperature_c = reading.temperature_c;
        session.weather_live = reading.success;
        session.logged_water_ml = 0;
        session.logged_calories_kcal = 0.0;
        session.burned_calories_kcal = 0.0;
        session.profile = Some(profile);
        session.step = DialogStep::Idle;

        tracing::info!(
            %user,
            water_goal_ml = session.water_goal_ml,
            calorie_goal_kcal = session.calorie_goal_kcal,
            temperature_c = session.temperature_c,
            weather_live = session.weather_live,
            "Profile configured"
        );

        Reply::text(messages::profile_summary(session))
            .preceded_by(notice)
            .with_menu()
    }

    async fn resolve_food(&self, session: &mut UserSession, input: &str) -> Reply {
        let query = match dialog::parse_food_name(input) {
            Ok(query) => query,
            Err(_) => {
                session.step = DialogStep::FoodName;
                return Reply::text(messages::food_prompt());
            }
        };

        let notice = messages::food_searching(&query);
        match self.food.lookup(&query).await {
            FoodResolution::Found(item) => {
                let reply = messages::food_found(&item);
                session.step = DialogStep::FoodAmount(PendingFood {
                    name: item.name,
                    calories_per_100g: item.calories_per_100g,
                });
                Reply::text(reply).preceded_by(notice)
            }
            FoodResolution::NotFound { similar } => {
                session.step = DialogStep::Idle;
                Reply::text(messages::food_not_found(&query, &similar)).preceded_by(notice)
            }
        }
    }

    async fn cancel(&self, user: UserId) -> Reply {
        let previous = match self.store.get(user).await {
            Some(slot) => {
                let mut session = slot.lock().await;
                std::mem::take(&mut session.step)
            }
            None => DialogStep::Idle,
        };

        let text = match previous {
            DialogStep::Profile(_) => messages::profile_cancelled(),
            _ => messages::cancelled(),
        };
        Reply::text(text).with_menu()
    }

    async fn check_progress(&self, user: UserId) -> Reply {
        let Some(session) = self.store.snapshot(user).await else {
            return Reply::text(messages::profile_required());
        };
        if !session.is_configured() {
            return Reply::text(messages::profile_required());
        }
        Reply::text(messages::progress(&ProgressReport::from_session(&session)))
    }
}

fn log_water(user: UserId, session: &mut UserSession, input: &str) -> Reply {
    match dialog::parse_water(input) {
        Ok(amount) => {
            session.logged_water_ml = session.logged_water_ml.saturating_add(amount);
            session.step = DialogStep::Idle;
            tracing::info!(%user, amount, total = session.logged_water_ml, "Water logged");
            Reply::text(messages::water_logged(
                amount,
                session.logged_water_ml,
                session.water_goal_ml,
            ))
        }
        Err(e) => {
            session.step = DialogStep::Water;
            Reply::text(messages::water_invalid(&e))
        }
    }
}

fn log_food(user: UserId, session: &mut UserSession, pending: PendingFood, input: &str) -> Reply {
    match dialog::parse_food_grams(input) {
        Ok(grams) => {
            let calories = pending.calories_per_100g * grams / 100.0;
            session.logged_calories_kcal += calories;
            session.step = DialogStep::Idle;
            tracing::info!(%user, food = %pending.name, grams, calories, "Food logged");
            Reply::text(messages::food_logged(&pending.name, grams, calories, session))
        }
        Err(e) => {
            let reply = messages::food_amount_invalid(&e);
            session.step = DialogStep::FoodAmount(pending);
            Reply::text(reply)
        }
    }
}

fn log_workout(user: UserId, session: &mut UserSession, input: &str) -> Reply {
    let (kind, minutes) = match dialog::parse_workout(input) {
        Ok(parsed) => parsed,
        Err(e) => {
            session.step = DialogStep::Workout;
            return Reply::text(messages::workout_invalid(&e));
        }
    };
    let Some(weight_kg) = session.profile.as_ref().map(|p| p.weight_kg) else {
        session.step = DialogStep::Idle;
        return Reply::text(messages::profile_required());
    };

    let burned = goals::workout_burn(catalog::workout_rate(&kind), minutes, weight_kg);
    let extra_water = goals::workout_extra_water(minutes);
    session.burned_calories_kcal += burned;
    session.water_goal_ml = session.water_goal_ml.saturating_add(extra_water);
    session.step = DialogStep::Idle;

    tracing::info!(%user, kind = %kind, minutes, burned, extra_water, "Workout logged");
    Reply::text(messages::workout_logged(
        &kind,
        minutes,
        burned,
        extra_water,
        session.burned_calories_kcal,
    ))
}
