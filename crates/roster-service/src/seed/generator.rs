//! Random user record generation.

use chrono::{Days, NaiveDate};
use rand::Rng;
use roster_core::{NewUser, RosterError, RosterResult};
use std::collections::HashSet;

/// Department labels assigned to generated users.
pub const DEPARTMENTS: [&str; 7] = [
    "Engineering",
    "Marketing",
    "Sales",
    "HR",
    "Finance",
    "IT",
    "Operations",
];

/// Role labels assigned to generated users.
pub const ROLES: [&str; 7] = [
    "Intern",
    "Junior",
    "Mid-level",
    "Senior",
    "Lead",
    "Manager",
    "Director",
];

const FIRST_NAMES: [&str; 32] = [
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda",
    "David", "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica",
    "Thomas", "Sarah", "Charles", "Karen", "Daniel", "Nancy", "Matthew", "Lisa",
    "Anthony", "Betty", "Mark", "Sandra", "Steven", "Ashley", "Andrew", "Emily",
];

const LAST_NAMES: [&str; 32] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
    "Rodriguez", "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas",
    "Taylor", "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White",
    "Harris", "Sanchez", "Clark", "Ramirez", "Lewis", "Robinson", "Walker", "Young",
];

const EMAIL_DOMAINS: [&str; 3] = ["example.com", "example.org", "example.net"];

/// How far back join dates reach.
const JOIN_WINDOW_DAYS: u64 = 5 * 365;

/// Draws per requested record before giving up on finding unique emails.
const ATTEMPTS_PER_RECORD: usize = 50;

/// Produces plausible, uniquely-addressed user records.
pub struct RecordGenerator<R: Rng> {
    rng: R,
    today: NaiveDate,
    attempts_per_record: usize,
}

impl<R: Rng> RecordGenerator<R> {
    /// Creates a generator whose join dates end at `today`.
    pub fn new(rng: R, today: NaiveDate) -> Self {
        Self {
            rng,
            today,
            attempts_per_record: ATTEMPTS_PER_RECORD,
        }
    }

    /// Overrides how many draws each requested record may take.
    #[must_use]
    pub fn with_attempts_per_record(mut self, attempts: usize) -> Self {
        self.attempts_per_record = attempts;
        self
    }

    /// Generates `count` records with pairwise distinct emails.
    ///
    /// Fails with [`RosterError::SeedExhausted`] when the attempt budget runs
    /// out first.
    pub fn generate(&mut self, count: usize) -> RosterResult<Vec<NewUser>> {
        let mut users = Vec::with_capacity(count);
        let mut emails = HashSet::with_capacity(count);
        let budget = count.saturating_mul(self.attempts_per_record);

        for _ in 0..budget {
            if users.len() == count {
                break;
            }
            let user = self.next_user();
            if emails.insert(user.email.clone()) {
                users.push(user);
            }
        }

        if users.len() < count {
            return Err(RosterError::SeedExhausted {
                requested: count,
                produced: users.len(),
            });
        }

        Ok(users)
    }

    fn next_user(&mut self) -> NewUser {
        let first = self.pick(&FIRST_NAMES);
        let last = self.pick(&LAST_NAMES);
        let domain = self.pick(&EMAIL_DOMAINS);
        let suffix: u32 = self.rng.random_range(1..100);

        NewUser {
            name: format!("{} {}", first, last),
            email: format!(
                "{}.{}{}@{}",
                first.to_lowercase(),
                last.to_lowercase(),
                suffix,
                domain
            ),
            role: self.pick(&ROLES).to_string(),
            department: self.pick(&DEPARTMENTS).to_string(),
            date_joined: self.join_date(),
        }
    }

    fn pick(&mut self, options: &[&'static str]) -> &'static str {
        options[self.rng.random_range(0..options.len())]
    }

    fn join_date(&mut self) -> NaiveDate {
        let days_ago = self.rng.random_range(0..=JOIN_WINDOW_DAYS);
        self.today
            .checked_sub_days(Days::new(days_ago))
            .unwrap_or(self.today)
    }
}
