use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::TurismoError;
use crate::questionnaire::{ChoiceQuestion, CompleteAnswers, NumericQuestion};

/// Visitor profile produced by the questionnaire.
///
/// The single-letter label is the key used by the recommendation table.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum ProfileGroup {
    /// Museums, history and the old town
    CulturalExplorer,
    /// Hikes, parks and cycling
    NatureAdventure,
    /// Restaurants, markets and nightlife
    FoodNightlife,
    /// Short stays close to the business districts
    BusinessTraveller,
    /// Plans for groups with children
    FamilyVisitor,
}

impl ProfileGroup {
    /// All groups in tie-break order.
    pub const ALL: [ProfileGroup; 5] = [
        ProfileGroup::CulturalExplorer,
        ProfileGroup::NatureAdventure,
        ProfileGroup::FoodNightlife,
        ProfileGroup::BusinessTraveller,
        ProfileGroup::FamilyVisitor,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProfileGroup::CulturalExplorer => "A",
            ProfileGroup::NatureAdventure => "B",
            ProfileGroup::FoodNightlife => "C",
            ProfileGroup::BusinessTraveller => "D",
            ProfileGroup::FamilyVisitor => "E",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for ProfileGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileGroup::CulturalExplorer => write!(f, "Explorador cultural"),
            ProfileGroup::NatureAdventure => write!(f, "Naturaleza y aventura"),
            ProfileGroup::FoodNightlife => write!(f, "Gastronomía y rumba"),
            ProfileGroup::BusinessTraveller => write!(f, "Viajero de negocios"),
            ProfileGroup::FamilyVisitor => write!(f, "Plan familiar"),
        }
    }
}

impl FromStr for ProfileGroup {
    type Err = TurismoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProfileGroup::ALL
            .into_iter()
            .find(|g| g.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TurismoError::UnknownProfileGroup {
                label: s.to_string(),
            })
    }
}

/// Maps a complete questionnaire to a profile group.
///
/// Implementations must be pure: the same answers always give the same group.
pub trait ProfileModel {
    fn classify(&self, answers: &CompleteAnswers) -> ProfileGroup;
}

type ChoiceRule = (ChoiceQuestion, &'static str, &'static [(ProfileGroup, i32)]);

/// Points per selected option. Options without a rule score nothing.
const CHOICE_RULES: &[ChoiceRule] = {
    use ChoiceQuestion::*;
    use ProfileGroup::*;
    &[
        (TripPurpose, "ocio", &[(CulturalExplorer, 1), (NatureAdventure, 1), (FoodNightlife, 1)]),
        (TripPurpose, "negocios", &[(BusinessTraveller, 4)]),
        (TripPurpose, "familia", &[(FamilyVisitor, 3)]),
        (TripPurpose, "estudios", &[(CulturalExplorer, 2)]),
        (FavouriteActivity, "museos", &[(CulturalExplorer, 3)]),
        (FavouriteActivity, "naturaleza", &[(NatureAdventure, 3)]),
        (FavouriteActivity, "gastronomia", &[(FoodNightlife, 2)]),
        (FavouriteActivity, "vida_nocturna", &[(FoodNightlife, 3)]),
        (FavouriteActivity, "compras", &[(FoodNightlife, 1), (BusinessTraveller, 1)]),
        (Companions, "solo", &[(BusinessTraveller, 1), (NatureAdventure, 1)]),
        (Companions, "pareja", &[(FoodNightlife, 1), (CulturalExplorer, 1)]),
        (Companions, "amigos", &[(FoodNightlife, 2), (NatureAdventure, 1)]),
        (Companions, "familia_con_ninos", &[(FamilyVisitor, 4)]),
        (Lodging, "hotel", &[(BusinessTraveller, 2)]),
        (Lodging, "hostal", &[(NatureAdventure, 1), (FoodNightlife, 1)]),
        (Lodging, "casa_familiar", &[(FamilyVisitor, 2)]),
        (Transport, "bicicleta", &[(NatureAdventure, 2)]),
        (Transport, "a_pie", &[(CulturalExplorer, 1)]),
        (Transport, "taxi_app", &[(BusinessTraveller, 1)]),
        (Transport, "vehiculo_propio", &[(FamilyVisitor, 1)]),
        (TimeOfDay, "manana", &[(NatureAdventure, 1), (FamilyVisitor, 1)]),
        (TimeOfDay, "tarde", &[(CulturalExplorer, 1)]),
        (TimeOfDay, "noche", &[(FoodNightlife, 2)]),
        (Pace, "tranquilo", &[(FamilyVisitor, 1), (CulturalExplorer, 1)]),
        (Pace, "intenso", &[(NatureAdventure, 2), (BusinessTraveller, 1)]),
        (HistoryInterest, "alto", &[(CulturalExplorer, 3)]),
        (HistoryInterest, "medio", &[(CulturalExplorer, 1)]),
        (HistoryInterest, "bajo", &[(FoodNightlife, 1)]),
        (OutdoorWeather, "disfruta", &[(NatureAdventure, 2)]),
        (OutdoorWeather, "evita", &[(CulturalExplorer, 1), (BusinessTraveller, 1)]),
        (SafetyPriority, "alta", &[(FamilyVisitor, 2), (BusinessTraveller, 1)]),
        (SafetyPriority, "baja", &[(FoodNightlife, 1)]),
    ]
};

/// Additive scoring model.
///
/// Every answer adds points to one or more groups and the group with the
/// highest total wins. Ties go to the group listed first in [`ProfileGroup::ALL`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ScoringModel;

type Scores = [i32; ProfileGroup::ALL.len()];

impl ScoringModel {
    pub fn new() -> Self {
        Self
    }

    /// Per-group totals, indexed like [`ProfileGroup::ALL`].
    pub fn scores(&self, answers: &CompleteAnswers) -> Scores {
        let mut scores: Scores = [0; ProfileGroup::ALL.len()];
        Self::score_numbers(answers, &mut scores);
        Self::score_choices(answers, &mut scores);
        scores
    }

    fn score_numbers(answers: &CompleteAnswers, scores: &mut Scores) {
        use ProfileGroup::*;

        let age = answers.number(NumericQuestion::Age);
        if age < 30 {
            bump(scores, &[(FoodNightlife, 2), (NatureAdventure, 1)]);
        } else if age >= 60 {
            bump(scores, &[(CulturalExplorer, 2)]);
        }

        let stay_days = answers.number(NumericQuestion::StayDays);
        if stay_days <= 3 {
            bump(scores, &[(BusinessTraveller, 2)]);
        } else if stay_days >= 10 {
            bump(scores, &[(NatureAdventure, 1), (CulturalExplorer, 1)]);
        }

        let budget = answers.number(NumericQuestion::DailyBudget);
        if budget >= 600 {
            bump(scores, &[(BusinessTraveller, 2), (FoodNightlife, 1)]);
        } else if budget < 150 {
            bump(scores, &[(NatureAdventure, 1)]);
        }

        let group_size = answers.number(NumericQuestion::GroupSize);
        if group_size >= 4 {
            bump(scores, &[(FamilyVisitor, 2)]);
        } else if group_size == 1 {
            bump(scores, &[(BusinessTraveller, 1)]);
        }

        let visits = answers.number(NumericQuestion::PreviousVisits);
        if visits == 0 {
            bump(scores, &[(CulturalExplorer, 1)]);
        } else if visits >= 5 {
            bump(scores, &[(FoodNightlife, 1), (BusinessTraveller, 1)]);
        }
    }

    fn score_choices(answers: &CompleteAnswers, scores: &mut Scores) {
        for (question, option_id, points) in CHOICE_RULES {
            if answers.choice(*question) == *option_id {
                bump(scores, points);
            }
        }
    }
}

fn bump(scores: &mut Scores, points: &[(ProfileGroup, i32)]) {
    for (group, value) in points {
        scores[group.index()] += value;
    }
}

/// Highest score wins, earliest group on ties.
fn pick_group(scores: &Scores) -> ProfileGroup {
    let mut best = ProfileGroup::ALL[0];
    for group in ProfileGroup::ALL.into_iter().skip(1) {
        if scores[group.index()] > scores[best.index()] {
            best = group;
        }
    }
    best
}

impl ProfileModel for ScoringModel {
    fn classify(&self, answers: &CompleteAnswers) -> ProfileGroup {
        let scores = self.scores(answers);
        let group = pick_group(&scores);
        log::debug!("Profile scores {:?} -> {}", scores, group.label());
        group
    }
}
