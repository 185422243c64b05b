mod role;
mod statuses;
mod user_profile;
