// Copyright 2026 ADMS RDS UI contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Interactive prompting.
//!
//! Commands never read the terminal directly. They ask a [`Prompter`], which
//! is [`TerminalPrompter`] for real runs and [`ScriptedPrompter`] when the
//! answers are known up front.

use crate::error::Result;
use console::style;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// A selectable item in a multi-select prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Text shown to the user.
    pub title: String,
    /// Value returned when selected.
    pub value: String,
}

impl Choice {
    /// Creates a choice.
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
        }
    }
}

/// Source of answers to interactive questions.
pub trait Prompter {
    /// Asks a yes/no question.
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool>;

    /// Asks for a line of text. An empty answer yields `default`.
    fn input(&mut self, message: &str, default: &str) -> Result<String>;

    /// Asks the user to pick any number of `choices`; returns their values.
    fn multi_select(&mut self, message: &str, choices: &[Choice]) -> Result<Vec<String>>;
}

/// Interprets a yes/no answer. Anything unrecognized yields `default`.
pub fn parse_confirm(answer: &str, default: bool) -> bool {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => true,
        "n" | "no" => false,
        _ => default,
    }
}

/// Interprets a multi-select answer.
///
/// Tokens are separated by commas or whitespace; each is either a 1-based
/// index into `choices`, a choice value, or a choice title (case-insensitive).
/// Unknown tokens are dropped and the result keeps first-seen order without
/// duplicates.
pub fn parse_selection(answer: &str, choices: &[Choice]) -> Vec<String> {
    let mut selected: Vec<String> = Vec::new();

    for token in answer
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        let choice = match token.parse::<usize>() {
            Ok(n) if n >= 1 && n <= choices.len() => Some(&choices[n - 1]),
            _ => choices.iter().find(|c| {
                c.value.eq_ignore_ascii_case(token) || c.title.eq_ignore_ascii_case(token)
            }),
        };

        match choice {
            Some(choice) if !selected.contains(&choice.value) => {
                selected.push(choice.value.clone())
            }
            Some(_) => {}
            None => tracing::debug!("Ignoring unknown selection: {}", token),
        }
    }

    selected
}

/// Prompts on stdout and reads answers line by line from stdin.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    /// Creates a terminal prompter.
    pub fn new() -> Self {
        Self
    }

    fn read_line(&self) -> Result<String> {
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;
        Ok(input.trim().to_string())
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        print!("{} {} {} ", style("?").cyan(), message, style(format!("({})", hint)).dim());
        let answer = self.read_line()?;
        Ok(parse_confirm(&answer, default))
    }

    fn input(&mut self, message: &str, default: &str) -> Result<String> {
        if default.is_empty() {
            print!("{} {} ", style("?").cyan(), message);
        } else {
            print!(
                "{} {} {} ",
                style("?").cyan(),
                message,
                style(format!("[{}]", default)).dim()
            );
        }
        let answer = self.read_line()?;
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }

    fn multi_select(&mut self, message: &str, choices: &[Choice]) -> Result<Vec<String>> {
        println!();
        println!("{} {}", style("?").cyan(), message);
        println!();
        for (i, choice) in choices.iter().enumerate() {
            println!("  {:>2}. {} {}", i + 1, choice.title, style(&choice.value).dim());
        }
        println!();
        print!("Enter numbers or names, separated by commas: ");
        let answer = self.read_line()?;
        Ok(parse_selection(&answer, choices))
    }
}

/// Answers questions from a predefined script.
///
/// Each question consumes one scripted answer; once the script runs out,
/// questions take their defaults (multi-selects pick nothing). Every question
/// is recorded in [`ScriptedPrompter::asked`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    /// Creates a prompter that replays `answers` in order.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Questions asked so far.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    fn next_answer(&mut self, message: &str) -> Option<String> {
        self.asked.push(message.to_string());
        self.answers.pop_front()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        Ok(self
            .next_answer(message)
            .map(|a| parse_confirm(&a, default))
            .unwrap_or(default))
    }

    fn input(&mut self, message: &str, default: &str) -> Result<String> {
        Ok(self
            .next_answer(message)
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| default.to_string()))
    }

    fn multi_select(&mut self, message: &str, choices: &[Choice]) -> Result<Vec<String>> {
        Ok(self
            .next_answer(message)
            .map(|a| parse_selection(&a, choices))
            .unwrap_or_default())
    }
}
