//! The cupboard: every food seen during a run, keyed by canonical name.
//!
//! Canonicalization is trim + lowercase + a single alias hop. Ingredient
//! decomposition attributes a composite food's outcomes to its components
//! as well as itself, recursively ("pizza" also credits "cheese",
//! "tomato", and "bread", and "bread" further credits "gluten").

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::event::Polarity;

/// A food and its accumulated outcome counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Food {
    /// Canonical name: post-alias, trimmed, lowercase.
    pub name: String,
    good: u32,
    bad: u32,
}

impl Food {
    fn new(name: String) -> Self {
        Self {
            name,
            good: 0,
            bad: 0,
        }
    }

    /// Number of good outcomes attributed to this food.
    pub const fn good(&self) -> u32 {
        self.good
    }

    /// Number of bad outcomes attributed to this food.
    pub const fn bad(&self) -> u32 {
        self.bad
    }

    /// Attributes one outcome to this food.
    pub const fn add_poop(&mut self, polarity: Polarity) {
        match polarity {
            Polarity::Good => self.good += 1,
            Polarity::Bad => self.bad += 1,
        }
    }

    /// Ratio of good to bad outcomes; 0 when no bad outcomes were seen.
    pub fn quality(&self) -> f64 {
        if self.bad == 0 {
            0.0
        } else {
            f64::from(self.good) / f64::from(self.bad)
        }
    }

    /// Sample-size heuristic in [0, 1): `((n/(n+1)) - 0.5) * 2` for
    /// `n = good + bad`, floored at 0 so an unobserved food scores 0
    /// rather than a negative value.
    pub fn confidence(&self) -> f64 {
        let n = f64::from(self.good + self.bad);
        ((n / (n + 1.0) - 0.5) * 2.0).max(0.0)
    }
}

/// Static name tables: aliases, ingredient decomposition, and labels to
/// ignore outright. Built once at startup and handed to [`Cupboard::new`].
#[derive(Debug, Clone, Default)]
pub struct Tables {
    aliases: HashMap<String, String>,
    ingredients: HashMap<String, Vec<String>>,
    ignored: HashSet<String>,
}

impl Tables {
    /// Builds tables from explicit entries. Names are expected to be
    /// canonical (trimmed, lowercase) already.
    pub fn new(
        aliases: &[(&str, &str)],
        ingredients: &[(&str, &[&str])],
        ignored: &[&str],
    ) -> Self {
        Self {
            aliases: aliases
                .iter()
                .map(|&(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            ingredients: ingredients
                .iter()
                .map(|&(name, parts)| {
                    (
                        name.to_string(),
                        parts.iter().map(ToString::to_string).collect(),
                    )
                })
                .collect(),
            ignored: ignored.iter().map(ToString::to_string).collect(),
        }
    }

    /// The hand-maintained tables for the journal this tool was written
    /// for: spelling variants observed in the data, common composite
    /// foods, and placeholder strings the sheet accumulates.
    pub fn journal_defaults() -> Self {
        Self::new(
            &[
                ("oat milk", "oatmilk"),
                ("yoghurt", "yogurt"),
                ("soda water", "sparkling water"),
                ("chips", "potato chips"),
                ("espresso", "coffee"),
            ],
            &[
                ("pizza", &["cheese", "tomato", "bread"]),
                ("coffee", &["caffeine"]),
                ("latte", &["coffee", "milk"]),
                ("cheese", &["milk"]),
                ("yogurt", &["milk"]),
                ("ice cream", &["milk", "sugar"]),
                ("bread", &["gluten"]),
                ("burrito", &["tortilla", "beans", "cheese", "rice"]),
                ("tortilla", &["gluten"]),
                ("beer", &["alcohol", "gluten"]),
                ("wine", &["alcohol"]),
            ],
            // Artifacts from the sheet: autofilled numbers and placeholders.
            &["0", "1", "nan", "none", "n/a", "-"],
        )
    }
}

/// Registry of every [`Food`] created during one analysis run.
#[derive(Debug, Default)]
pub struct Cupboard {
    tables: Tables,
    foods: HashMap<String, Food>,
}

impl Cupboard {
    /// Creates an empty cupboard backed by the given name tables.
    pub fn new(tables: Tables) -> Self {
        Self {
            tables,
            foods: HashMap::new(),
        }
    }

    /// Creates a cupboard with [`Tables::journal_defaults`].
    pub fn with_defaults() -> Self {
        Self::new(Tables::journal_defaults())
    }

    fn canonicalize(&self, raw: &str) -> String {
        let name = raw.trim().to_lowercase();
        self.tables.aliases.get(&name).cloned().unwrap_or(name)
    }

    /// True when the label is a known garbage string that must never
    /// become a food.
    pub fn is_ignored(&self, raw: &str) -> bool {
        self.tables.ignored.contains(&raw.trim().to_lowercase())
    }

    /// Looks up or creates the food for a raw name. The same canonical
    /// name always resolves to the same entry within a run, so counters
    /// accumulate in one place.
    pub fn resolve(&mut self, raw: &str) -> &mut Food {
        let name = self.canonicalize(raw);
        self.foods
            .entry(name.clone())
            .or_insert_with(|| Food::new(name))
    }

    /// The canonical names of a food and its full ingredient closure,
    /// including the food itself. Creates a [`Food`] entry for every
    /// component so later reporting sees them; counters are untouched.
    /// Ignore-listed labels decompose to nothing and create no entries.
    ///
    /// The ingredient graph is expected to be acyclic; the visited set
    /// makes a defective cyclic table terminate instead of recursing
    /// forever.
    pub fn components(&mut self, raw: &str) -> BTreeSet<String> {
        let mut seen = BTreeSet::new();
        if self.is_ignored(raw) {
            return seen;
        }
        let mut pending = vec![self.canonicalize(raw)];
        while let Some(name) = pending.pop() {
            if !seen.insert(name.clone()) {
                continue;
            }
            if let Some(parts) = self.tables.ingredients.get(&name) {
                pending.extend(parts.iter().map(|part| self.canonicalize(part)));
            }
        }
        for name in &seen {
            if !self.foods.contains_key(name) {
                self.foods.insert(name.clone(), Food::new(name.clone()));
            }
        }
        seen
    }

    /// Attributes one outcome to a food and every food in its ingredient
    /// closure. A no-op for ignore-listed labels.
    pub fn record(&mut self, raw: &str, polarity: Polarity) {
        for name in self.components(raw) {
            if let Some(food) = self.foods.get_mut(&name) {
                food.add_poop(polarity);
            }
        }
    }

    /// The food for a raw name, if one was created. Read-only counterpart
    /// of [`Cupboard::resolve`].
    pub fn get(&self, raw: &str) -> Option<&Food> {
        self.foods.get(&self.canonicalize(raw))
    }

    /// Every food created so far.
    pub fn foods(&self) -> impl Iterator<Item = &Food> {
        self.foods.values()
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }
}
