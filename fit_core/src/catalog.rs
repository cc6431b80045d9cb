//! Built-in content: the default workout library, trainer slots and services,
//! the starter feed and the motivational quotes behind the daily directive.

use crate::clock::day_label;
use crate::types::*;
use chrono::NaiveDate;
use once_cell::sync::Lazy;

/// Cached default workout library - built once and cloned into new profiles
static DEFAULT_WORKOUTS: Lazy<Vec<Workout>> = Lazy::new(build_default_workouts);

/// The built-in blueprint library every profile starts with
pub fn default_workouts() -> Vec<Workout> {
    DEFAULT_WORKOUTS.clone()
}

fn build_default_workouts() -> Vec<Workout> {
    vec![
        Workout {
            id: "bp-setup-01".into(),
            title: "Bench Press Setup".into(),
            duration: 10,
            level: Level::Advanced,
            category: "Upper Body".into(),
            image_url: "https://images.unsplash.com/photo-1534438327276-14e5300c3a48?q=80&w=800&h=1422&auto=format&fit=crop".into(),
            video_url: Some("https://assets.mixkit.co/videos/preview/mixkit-athletic-man-lifting-weights-in-a-dark-gym-2384-large.mp4".into()),
            description: Some("How to set your scapula and grip for maximum leverage. Focus on leg drive and maintaining a rigid thoracic arch for maximum power transfer.".into()),
            exercises: None,
            tags: Some(vec!["bench".into(), "chest".into(), "strength".into(), "form".into()]),
            visibility: Some(Visibility::Public),
            storage_path: None,
            download_url: None,
            created_at: Some("2024-01-01T00:00:00.000Z".into()),
            updated_at: Some("2024-01-01T00:00:00.000Z".into()),
            owner_uid: Some("twin-uid-master".into()),
        },
        Workout {
            id: "ropes-01".into(),
            title: "High Intensity Ropes".into(),
            duration: 30,
            level: Level::Intermediate,
            category: "HIIT".into(),
            image_url: "https://images.unsplash.com/photo-1541534741688-6078c6bfb5c5?q=80&w=800&h=1422&auto=format&fit=crop".into(),
            video_url: Some("https://assets.mixkit.co/videos/preview/mixkit-legs-of-a-person-running-on-a-treadmill-2426-large.mp4".into()),
            description: Some("Tabata style ropes. 20s work, 10s rest. Focus on core stability and explosive arm movements to drive metabolic demand.".into()),
            exercises: None,
            tags: Some(vec!["hiit".into(), "cardio".into(), "ropes".into()]),
            visibility: Some(Visibility::Clients),
            storage_path: None,
            download_url: None,
            created_at: None,
            updated_at: None,
            owner_uid: Some("twin-uid-master".into()),
        },
        Workout {
            id: "p1".into(),
            title: "Private Bench PR Review".into(),
            duration: 5,
            level: Level::Advanced,
            category: "Strength".into(),
            image_url: "https://images.unsplash.com/photo-1534367507873-d25dfeac3438?q=80&w=800&h=1422&auto=format&fit=crop".into(),
            video_url: Some("https://assets.mixkit.co/videos/preview/mixkit-athletic-man-lifting-weights-in-a-dark-gym-2384-large.mp4".into()),
            description: Some("Reviewing bar path on the last 315lb set. Noticing slight elbow flare on rep 3 which could lead to joint instability.".into()),
            exercises: None,
            tags: Some(vec!["personal".into(), "form-check".into()]),
            visibility: Some(Visibility::Private),
            storage_path: None,
            download_url: None,
            created_at: None,
            updated_at: None,
            owner_uid: Some("twin-uid-master".into()),
        },
    ]
}

/// Categories offered by the workout library filter
pub const WORKOUT_CATEGORIES: [&str; 5] = ["Upper Body", "Lower Body", "Strength", "HIIT", "Cardio"];

/// Trainer's bookable day slots
pub fn default_slots() -> Vec<BookingSlot> {
    [
        ("1", "06:00 AM", true),
        ("2", "08:00 AM", false),
        ("3", "10:00 AM", true),
        ("4", "02:00 PM", true),
        ("5", "04:00 PM", true),
        ("6", "06:00 PM", false),
    ]
    .into_iter()
    .map(|(id, time, available)| BookingSlot {
        id: id.into(),
        time: time.into(),
        available,
        custom_price: None,
        reserved_for: None,
    })
    .collect()
}

pub fn default_services() -> Vec<TrainerService> {
    vec![TrainerService {
        id: "2".into(),
        title: "1-on-1 Intensive Training".into(),
        price: 150.0,
        duration: 60,
        description: "High-intensity session with Twin. Focus on elite form, compound strength, and pushing mental limits.".into(),
    }]
}

pub fn default_posts() -> Vec<Post> {
    vec![
        Post {
            id: "1".into(),
            user_id: "twin".into(),
            user_name: "Twin (Coach)".into(),
            user_avatar: "https://picsum.photos/100/100?random=1".into(),
            content: "Client Session Recap: Form is everything. Watch how we controlled the negative on these rows. Built Strong. Built Tough.".into(),
            image_url: None,
            video_url: Some("https://assets.mixkit.co/videos/preview/mixkit-athletic-man-lifting-weights-in-a-dark-gym-2384-large.mp4".into()),
            likes: 142,
            comments: 12,
            timestamp: "2h ago".into(),
            category: PostCategory::Workout,
            is_trainer: Some(true),
        },
        Post {
            id: "2".into(),
            user_id: "user2".into(),
            user_name: "Sarah Jenkins".into(),
            user_avatar: "https://picsum.photos/100/100?random=2".into(),
            content: "Finally hit a plate (135lbs) on my squat! The Leg Day Destruction program is no joke".into(),
            image_url: Some("https://picsum.photos/600/400?random=10".into()),
            video_url: None,
            likes: 45,
            comments: 8,
            timestamp: "4h ago".into(),
            category: PostCategory::Achievement,
            is_trainer: None,
        },
        Post {
            id: "3".into(),
            user_id: "user3".into(),
            user_name: "Mike T.".into(),
            user_avatar: "https://picsum.photos/100/100?random=3".into(),
            content: "Question for the group: How are you guys hitting your protein goals on rest days? I feel like I'm always short.".into(),
            image_url: None,
            video_url: None,
            likes: 12,
            comments: 24,
            timestamp: "6h ago".into(),
            category: PostCategory::Nutrition,
            is_trainer: None,
        },
    ]
}

// ============================================================================
// Daily Directive
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuoteCategory {
    Strength,
    Endurance,
    Mindset,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Quote {
    pub text: &'static str,
    pub category: QuoteCategory,
}

pub static QUOTES: [Quote; 12] = [
    Quote { text: "Strength does not come from winning. Your struggles develop your strengths.", category: QuoteCategory::Strength },
    Quote { text: "The pain you feel today will be the strength you feel tomorrow.", category: QuoteCategory::Strength },
    Quote { text: "Don't stop when you're tired. Stop when you're done.", category: QuoteCategory::Endurance },
    Quote { text: "Endurance is not just the ability to bear a hard thing, but to turn it into glory.", category: QuoteCategory::Endurance },
    Quote { text: "When you want to quit, remember why you started.", category: QuoteCategory::Mindset },
    Quote { text: "The only limit to our realization of tomorrow will be our doubts of today.", category: QuoteCategory::Mindset },
    Quote { text: "Suffer the pain of discipline or suffer the pain of regret.", category: QuoteCategory::Strength },
    Quote { text: "Your body can stand almost anything. It's your mind that you have to convince.", category: QuoteCategory::Endurance },
    Quote { text: "Excellence is not a act, but a habit. You are what you repeatedly do.", category: QuoteCategory::Mindset },
    Quote { text: "Great things never came from comfort zones.", category: QuoteCategory::Endurance },
    Quote { text: "Discipline is doing what needs to be done, even if you don't want to do it.", category: QuoteCategory::Mindset },
    Quote { text: "The clock is ticking. Are you becoming the person you want to be?", category: QuoteCategory::Mindset },
];

/// Pick the quote of the day for a profile
///
/// The pick is stable for a calendar day: the seed is the sum of the
/// character codes of the day label. Muscle Gain steers to Strength quotes,
/// Fat Loss to Endurance, anything else to Mindset.
pub fn daily_directive(goals: &[Goal], today: NaiveDate) -> &'static Quote {
    let seed: usize = day_label(today).chars().map(|c| c as usize).sum();

    let category = if goals.contains(&Goal::MuscleGain) {
        QuoteCategory::Strength
    } else if goals.contains(&Goal::FatLoss) {
        QuoteCategory::Endurance
    } else {
        QuoteCategory::Mindset
    };

    let relevant: Vec<&'static Quote> = QUOTES.iter().filter(|q| q.category == category).collect();
    if relevant.is_empty() {
        &QUOTES[seed % QUOTES.len()]
    } else {
        relevant[seed % relevant.len()]
    }
}
