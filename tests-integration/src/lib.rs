//! End-to-end tests across the popup, messaging and content-script surfaces

#[cfg(test)]
mod commands;
#[cfg(test)]
mod insertion;
#[cfg(test)]
mod seeding;
