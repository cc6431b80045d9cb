use clap::{Args, Parser, Subcommand};
use fit_core::feed::PostDraft;
use fit_core::forms::{parse_goal, FoodForm};
use fit_core::nutrition::meal_sections;
use fit_core::progress::{weight_summary, weight_window, TimeFrame};
use fit_core::training::{completed_volume, filter_workouts};
use fit_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "twinfit")]
#[command(about = "Twin Fit daily tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or switch to a profile and make it active
    Login(LoginArgs),

    /// Forget the active profile (its data is kept)
    Logout,

    /// Show the active profile
    Whoami,

    /// Edit the active profile
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// Food log
    #[command(subcommand)]
    Food(FoodCommand),

    /// Water intake
    #[command(subcommand)]
    Water(WaterCommand),

    /// Exercise log
    #[command(subcommand)]
    Exercise(ExerciseCommand),

    /// Body weight history
    #[command(subcommand)]
    Weight(WeightCommand),

    /// Today's calorie balance, water and macros
    Summary,

    /// Run a live cardio session and log it
    Live {
        /// Seconds to run
        #[arg(long, default_value_t = 60)]
        seconds: u32,

        /// Low, Med or High (defaults to the configured intensity)
        #[arg(long)]
        intensity: Option<Intensity>,

        /// Sets to log before finishing
        #[arg(long, default_value_t = 0)]
        sets: u32,

        /// Override the tick interval
        #[arg(long)]
        tick_millis: Option<u64>,

        /// Add a quarter liter of water during the session
        #[arg(long)]
        quick_water: bool,
    },

    /// Browse the workout library
    Workouts {
        #[arg(long)]
        category: Option<String>,
    },

    /// Completed workout sessions
    History,

    /// Record a strength session
    Train {
        /// Library workout to start from
        #[arg(long)]
        workout: Option<String>,

        /// Extra exercise to add (repeatable)
        #[arg(long = "exercise")]
        exercises: Vec<String>,

        /// Sets per exercise (at least one)
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        sets: u32,

        #[arg(long, default_value_t = 10)]
        reps: u32,

        #[arg(long, default_value_t = 0.0)]
        weight: f64,
    },

    /// Trainer availability and services
    Slots,

    /// Book an open slot and show the resulting schedule
    ///
    /// Bookings are not stored; a later `slots` call starts from the
    /// default availability.
    Book { slot_id: String },

    /// Community feed
    Feed {
        #[arg(long)]
        category: Option<PostCategory>,

        /// Publish a post first
        #[arg(long)]
        post: Option<String>,

        #[arg(long)]
        image: Option<String>,
    },
}

#[derive(Args)]
struct LoginArgs {
    #[arg(long)]
    name: String,

    /// Training goal (repeatable): fat-loss, muscle-gain, maintenance
    #[arg(long = "goal", required = true)]
    goals: Vec<Goal>,

    #[arg(long, default_value = "other")]
    gender: Gender,

    #[arg(long, default_value_t = 30)]
    age: u32,

    /// Body weight in pounds
    #[arg(long, default_value_t = 180.0)]
    weight: f64,

    #[arg(long, default_value = "5'10\"")]
    height: String,

    #[arg(long, default_value = "beginner")]
    level: Level,

    #[arg(long)]
    trainer: bool,
}

#[derive(Subcommand)]
enum ProfileCommand {
    /// Set, nudge or reset the daily calorie goal
    Goal {
        value: Option<String>,

        #[arg(long, allow_hyphen_values = true, conflicts_with_all = ["value", "reset"])]
        nudge: Option<i64>,

        #[arg(long, conflicts_with = "value")]
        reset: bool,
    },
    /// Month-to-date earnings
    Earnings { amount: f64 },
    /// Body weight used for the calorie goal
    Weight { pounds: f64 },
}

#[derive(Args)]
struct FoodFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    calories: Option<String>,
    #[arg(long)]
    protein: Option<String>,
    #[arg(long)]
    carbs: Option<String>,
    #[arg(long)]
    fats: Option<String>,
    #[arg(long)]
    meal: Option<MealType>,
    /// Derive calories from the macros
    #[arg(long)]
    macro_calc: bool,
}

impl FoodFields {
    fn apply(self, form: &mut FoodForm) {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(calories) = self.calories {
            form.calories = calories;
        }
        if let Some(protein) = self.protein {
            form.protein = protein;
        }
        if let Some(carbs) = self.carbs {
            form.carbs = carbs;
        }
        if let Some(fats) = self.fats {
            form.fats = fats;
        }
        if let Some(meal) = self.meal {
            form.meal_type = meal;
        }
        form.use_macro_calc = self.macro_calc;
    }
}

#[derive(Subcommand)]
enum FoodCommand {
    Add(FoodFields),
    /// Log a calorie amount as a snack
    Quick { calories: u32 },
    Edit {
        id: String,
        #[command(flatten)]
        fields: FoodFields,
    },
    Rm { id: String },
    List,
}

#[derive(Subcommand)]
enum WaterCommand {
    #[command(allow_negative_numbers = true)]
    Add { liters: f64 },
    #[command(allow_negative_numbers = true)]
    Set { liters: f64 },
}

#[derive(Subcommand)]
enum ExerciseCommand {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        calories: f64,
    },
    Rm { id: String },
}

#[derive(Subcommand)]
enum WeightCommand {
    Add { weight: String },
    List {
        /// Show the last 30 entries instead of the last 7
        #[arg(long)]
        month: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    fit_core::logging::init(cli.quiet);

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(data_dir) = cli.data_dir {
        config.data.data_dir = data_dir;
    }
    let store = ProfileStore::new(FileStore::new(config.store_dir()));

    match cli.command {
        Commands::Login(args) => cmd_login(store, args),
        Commands::Logout => cmd_logout(store),
        Commands::Whoami => cmd_whoami(store),
        Commands::Profile(command) => cmd_profile(open(store)?, command),
        Commands::Food(command) => cmd_food(open(store)?, command),
        Commands::Water(command) => cmd_water(open(store)?, command),
        Commands::Exercise(command) => cmd_exercise(open(store)?, command),
        Commands::Weight(command) => cmd_weight(open(store)?, command),
        Commands::Summary => cmd_summary(&open(store)?),
        Commands::Live {
            seconds,
            intensity,
            sets,
            tick_millis,
            quick_water,
        } => {
            let intensity = intensity.unwrap_or(config.live.default_intensity);
            let ticker = Ticker::from_millis(tick_millis.unwrap_or(config.live.tick_millis));
            cmd_live(open(store)?, ticker, intensity, seconds, sets, quick_water)
        }
        Commands::Workouts { category } => cmd_workouts(&open(store)?, category.as_deref()),
        Commands::History => cmd_history(&open(store)?),
        Commands::Train {
            workout,
            exercises,
            sets,
            reps,
            weight,
        } => cmd_train(open(store)?, workout.as_deref(), &exercises, sets, reps, weight),
        Commands::Slots => cmd_slots(&open(store)?),
        Commands::Book { slot_id } => cmd_book(open(store)?, &slot_id),
        Commands::Feed {
            category,
            post,
            image,
        } => cmd_feed(open(store)?, category, post, image),
    }
}

type CliSession = Session<FileStore>;

fn open(store: ProfileStore<FileStore>) -> Result<CliSession> {
    Session::resume(store)?.ok_or(Error::NotLoggedIn)
}

fn not_found(what: &str, id: &str) -> Error {
    Error::InvalidInput(format!("no {} with id {}", what, id))
}

fn cmd_login(store: ProfileStore<FileStore>, args: LoginArgs) -> Result<()> {
    let draft = ProfileDraft {
        name: args.name,
        gender: args.gender,
        age: args.age,
        weight: args.weight,
        height: args.height,
        goals: args.goals,
        level: args.level,
    };
    let mut profile = draft.complete()?;
    if args.trainer {
        profile.is_trainer = Some(true);
    }

    let session = Session::login(store, profile)?;
    println!("Logged in as {}", session.profile().name);
    println!("Daily calorie goal: {} kcal", session.calorie_goal());
    Ok(())
}

fn cmd_logout(store: ProfileStore<FileStore>) -> Result<()> {
    match Session::resume(store)? {
        Some(session) => {
            let name = session.profile().name.clone();
            session.logout()?;
            println!("Logged out {}", name);
        }
        None => println!("Not logged in"),
    }
    Ok(())
}

fn cmd_whoami(store: ProfileStore<FileStore>) -> Result<()> {
    let Some(session) = Session::resume(store)? else {
        println!("Not logged in");
        return Ok(());
    };
    let profile = session.profile();
    let goals: Vec<String> = profile.goals.iter().map(|g| g.to_string()).collect();

    println!("{}", profile.name);
    println!("  Goals:        {}", goals.join(", "));
    println!("  Level:        {}", profile.level);
    println!("  Weight:       {} lb", profile.weight);
    println!("  Calorie goal: {} kcal", session.calorie_goal());
    if profile.is_trainer() {
        println!("  Trainer:      yes");
    }
    if let Some(earnings) = profile.earnings_mtd {
        println!("  Earnings MTD: ${:.2}", earnings);
    }
    Ok(())
}

fn cmd_profile(mut session: CliSession, command: ProfileCommand) -> Result<()> {
    match command {
        ProfileCommand::Goal {
            value,
            nudge,
            reset,
        } => {
            if reset {
                session.set_calorie_goal(None)?;
            } else if let Some(delta) = nudge {
                if session.nudge_calorie_goal(delta)?.is_none() {
                    return Err(Error::InvalidInput("calorie goal must stay positive".into()));
                }
            } else if let Some(value) = value {
                let goal = parse_goal(&value)
                    .ok_or_else(|| Error::InvalidInput(format!("invalid calorie goal: {}", value)))?;
                session.set_calorie_goal(Some(goal))?;
            }
            println!("Daily calorie goal: {} kcal", session.calorie_goal());
        }
        ProfileCommand::Earnings { amount } => {
            session.set_earnings(amount)?;
            println!("Earnings MTD: ${:.2}", amount);
        }
        ProfileCommand::Weight { pounds } => {
            session.set_body_weight(pounds)?;
            println!("Weight set to {} lb", pounds);
            println!("Daily calorie goal: {} kcal", session.calorie_goal());
        }
    }
    Ok(())
}

fn print_food(item: &FoodItem) {
    println!(
        "  {}  {:<24} {:>5} kcal  P{} C{} F{}  [{}]",
        item.time,
        item.name,
        item.calories,
        item.macros.protein,
        item.macros.carbs,
        item.macros.fats,
        item.id
    );
}

fn cmd_food(mut session: CliSession, command: FoodCommand) -> Result<()> {
    match command {
        FoodCommand::Add(fields) => {
            let mut form = FoodForm::default();
            fields.apply(&mut form);
            let item = session
                .submit_food(&form)?
                .ok_or_else(|| Error::InvalidInput("calories are required".into()))?;
            println!("Logged {} ({} kcal) [{}]", item.name, item.calories, item.id);
        }
        FoodCommand::Quick { calories } => {
            let item = session.quick_log(calories)?;
            println!("Logged {} ({} kcal) [{}]", item.name, item.calories, item.id);
        }
        FoodCommand::Edit { id, fields } => {
            let existing = session
                .state()
                .food_log
                .iter()
                .find(|item| item.id == id)
                .ok_or_else(|| not_found("food entry", &id))?;
            let mut form = FoodForm::from_item(existing);
            fields.apply(&mut form);
            if !session.edit_food(&id, &form)? {
                return Err(Error::InvalidInput("calories are required".into()));
            }
            println!("Updated {}", id);
        }
        FoodCommand::Rm { id } => {
            if !session.delete_food(&id)? {
                return Err(not_found("food entry", &id));
            }
            println!("Removed {}", id);
        }
        FoodCommand::List => {
            for section in meal_sections(&session.state().food_log) {
                println!("{} ({} kcal)", section.meal_type, section.calories);
                for item in section.items {
                    print_food(item);
                }
            }
            println!("Total: {} kcal", session.state().total_calories_in());
        }
    }
    Ok(())
}

fn cmd_water(mut session: CliSession, command: WaterCommand) -> Result<()> {
    let liters = match command {
        WaterCommand::Add { liters } => session.add_water(liters)?,
        WaterCommand::Set { liters } => session.set_water(liters)?,
    };
    println!("Water: {:.2} L", liters);
    Ok(())
}

fn cmd_exercise(mut session: CliSession, command: ExerciseCommand) -> Result<()> {
    match command {
        ExerciseCommand::Add { name, calories } => {
            let item = ExerciseItem {
                id: new_id(),
                name,
                calories,
                time: fit_core::clock::time_label(session.store().now()),
            };
            let id = item.id.clone();
            if !session.add_exercise(item)? {
                return Err(Error::InvalidInput("calories must be a non-negative number".into()));
            }
            println!("Logged exercise [{}]", id);
        }
        ExerciseCommand::Rm { id } => {
            if !session.delete_exercise(&id)? {
                return Err(not_found("exercise entry", &id));
            }
            println!("Removed {}", id);
        }
    }
    Ok(())
}

fn cmd_weight(mut session: CliSession, command: WeightCommand) -> Result<()> {
    match command {
        WeightCommand::Add { weight } => {
            let entry = session
                .log_weight(&weight)?
                .ok_or_else(|| Error::InvalidInput(format!("invalid weight: {}", weight)))?;
            println!("Logged {} lb on {}", entry.weight, entry.date);
        }
        WeightCommand::List { month } => {
            let frame = if month { TimeFrame::Month } else { TimeFrame::Week };
            let data = &session.state().weight_data;
            for entry in weight_window(data, frame) {
                println!("  {:<12} {:>6.1} lb", entry.date, entry.weight);
            }
            let summary = weight_summary(data);
            println!(
                "Start {:.1} lb, current {:.1} lb, change {:.1} lb",
                summary.start, summary.current, -summary.loss
            );
        }
    }
    Ok(())
}

fn cmd_summary(session: &CliSession) -> Result<()> {
    let summary = session.summary();
    println!("Goal:      {} kcal", summary.calorie_goal);
    println!("Eaten:     {} kcal", summary.calories_in);
    println!("Burned:    {:.0} kcal", summary.calories_burned);
    println!("Net:       {:.0} kcal", summary.net_balance);
    println!("Remaining: {:.0} kcal", summary.remaining);
    println!("Water:     {:.2} L", summary.water_intake);
    println!(
        "Macros:    P {}/{}g  C {}/{}g  F {}/{}g",
        summary.macros.protein,
        summary.macro_targets.protein,
        summary.macros.carbs,
        summary.macro_targets.carbs,
        summary.macros.fats,
        summary.macro_targets.fats
    );
    println!("\n\"{}\"", summary.directive.text);
    Ok(())
}

fn cmd_live(
    mut session: CliSession,
    ticker: Ticker,
    intensity: Intensity,
    seconds: u32,
    sets: u32,
    quick_water: bool,
) -> Result<()> {
    let mut rng = rand::thread_rng();
    session.set_live_intensity(intensity);
    session.toggle_live();
    println!("Live session started at {} intensity", intensity);

    let ran = ticker.run(session.live_mut(), seconds, &mut rng, |live| {
        if live.seconds() % 10 == 0 {
            tracing::info!(
                "{}s  {:.1} kcal  {} bpm",
                live.seconds(),
                live.calories(),
                live.heart_rate()
            );
        }
    });

    for _ in 0..sets {
        session.log_live_set();
    }
    if quick_water && session.live_quick_water()? {
        println!("Water: {:.2} L", session.state().water_intake);
    }

    let burned = session.live().calories();
    match session.finish_live()? {
        Some(entry) => println!(
            "Logged {} after {}s: {} kcal [{}]",
            entry.name, ran, entry.calories, entry.id
        ),
        None => println!("Session too short to log ({:.1} kcal)", burned),
    }
    Ok(())
}

fn cmd_workouts(session: &CliSession, category: Option<&str>) -> Result<()> {
    for workout in filter_workouts(&session.state().workouts, category) {
        println!(
            "{:<14} {:<28} {:>3} min  {:<12} {}",
            workout.id, workout.title, workout.duration, workout.level, workout.category
        );
    }
    Ok(())
}

fn cmd_history(session: &CliSession) -> Result<()> {
    let history = &session.state().workout_history;
    if history.is_empty() {
        println!("No workouts recorded yet");
    }
    for entry in history {
        println!(
            "{:<14} {:<28} {:>3} min  {:.0} lb volume",
            entry.date,
            entry.title,
            entry.duration,
            completed_volume(entry)
        );
    }
    Ok(())
}

fn cmd_train(
    mut session: CliSession,
    workout: Option<&str>,
    exercises: &[String],
    sets: u32,
    reps: u32,
    weight: f64,
) -> Result<()> {
    if !weight.is_finite() {
        return Err(Error::InvalidInput("weight must be a number".into()));
    }

    let active = session.start_workout(workout)?;
    for name in exercises {
        active.add_exercise(name, None);
    }

    let exercise_ids: Vec<String> = active.session().exercises.iter().map(|e| e.id.clone()).collect();
    for id in &exercise_ids {
        for _ in 1..sets {
            active.add_set(id);
        }
        let logged: Vec<ExerciseSet> = active
            .session()
            .exercises
            .iter()
            .find(|e| &e.id == id)
            .map(|e| e.sets.clone())
            .unwrap_or_default();
        for set in logged {
            active.update_set(
                id,
                ExerciseSet {
                    reps,
                    weight,
                    completed: true,
                    ..set
                },
            );
        }
    }

    if let Some(entry) = session.finish_workout()? {
        println!(
            "Recorded {} ({} exercises, {:.0} lb volume) [{}]",
            entry.title,
            entry.exercises.len(),
            completed_volume(&entry),
            entry.id
        );
    }
    Ok(())
}

fn cmd_slots(session: &CliSession) -> Result<()> {
    let board = session.booking();
    for slot in board.slots() {
        let status = if slot.available { "open" } else { "taken" };
        println!("  [{}] {}  {}", slot.id, slot.time, status);
    }
    for service in board.services() {
        println!(
            "{}: ${:.0} / {} min  {}",
            service.title, service.price, service.duration, service.description
        );
    }
    Ok(())
}

fn cmd_book(mut session: CliSession, slot_id: &str) -> Result<()> {
    let slot = session.booking_mut().book(slot_id)?;
    println!("Booked {}", slot.time);
    if let Some(next) = session.booking().next_booking() {
        println!("Next session: {}", next.time);
    }
    cmd_slots(&session)
}

fn cmd_feed(
    mut session: CliSession,
    category: Option<PostCategory>,
    post: Option<String>,
    image: Option<String>,
) -> Result<()> {
    if post.is_some() || image.is_some() {
        let author = session.profile().clone();
        let draft = PostDraft {
            content: post.unwrap_or_default(),
            category,
            image_url: image,
            video_url: None,
        };
        session.feed_mut().publish(&author, draft)?;
    }

    for post in session.feed().posts(category) {
        let badge = if post.is_trainer == Some(true) { " (trainer)" } else { "" };
        println!("{}{} · {}", post.user_name, badge, post.timestamp);
        if !post.content.is_empty() {
            println!("  {}", post.content);
        }
        println!("  {} likes, {} comments", post.likes, post.comments);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }
}
