use serde::{Deserialize, Serialize};

use crate::errors::TurismoError;

pub mod validator;
pub use validator::{
    Evaluation, FormValidator, INCOMPLETE_FORM_MESSAGE, QuestionnaireSession, SessionPhase,
    SubmissionOutput, Update, ViewState, Visibility,
};

pub const NUMERIC_COUNT: usize = 5;
pub const CHOICE_COUNT: usize = 10;
/// Total number of questions in the visitor questionnaire.
pub const QUESTION_COUNT: usize = NUMERIC_COUNT + CHOICE_COUNT;

/// A bounded numeric question.
#[derive(Debug, PartialEq, Eq)]
pub struct NumericField {
    pub id: &'static str,
    pub prompt: &'static str,
    pub min: i64,
    pub max: i64,
}

/// One selectable answer of a categorical question.
#[derive(Debug, PartialEq, Eq)]
pub struct ChoiceOption {
    pub id: &'static str,
    pub label: &'static str,
}

/// A single-choice question.
#[derive(Debug, PartialEq, Eq)]
pub struct ChoiceField {
    pub id: &'static str,
    pub prompt: &'static str,
    pub options: &'static [ChoiceOption],
}

impl NumericField {
    pub fn validate(&self, value: i64) -> Result<(), TurismoError> {
        if value < self.min || value > self.max {
            return Err(TurismoError::InvalidUserInput {
                field: self.id.to_string(),
                reason: format!("{} is outside {}..={}", value, self.min, self.max),
            });
        }
        Ok(())
    }

    /// Parse the text of a numeric input. Empty text leaves the question unanswered.
    pub fn parse_input(&self, text: &str) -> Result<Option<i64>, TurismoError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let value = text
            .parse::<i64>()
            .map_err(|_| TurismoError::InvalidUserInput {
                field: self.id.to_string(),
                reason: format!("'{}' is not a whole number", text),
            })?;
        self.validate(value)?;
        Ok(Some(value))
    }
}

impl ChoiceField {
    pub fn validate(&self, index: usize) -> Result<(), TurismoError> {
        if index >= self.options.len() {
            return Err(TurismoError::InvalidUserInput {
                field: self.id.to_string(),
                reason: format!("option {} does not exist", index),
            });
        }
        Ok(())
    }

    /// Position of the option with the given id.
    pub fn position(&self, option_id: &str) -> Option<usize> {
        self.options.iter().position(|o| o.id == option_id)
    }
}

/// A question of either kind, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDescriptor {
    Numeric(&'static NumericField),
    Choice(&'static ChoiceField),
}

impl FieldDescriptor {
    pub fn id(&self) -> &'static str {
        match self {
            FieldDescriptor::Numeric(f) => f.id,
            FieldDescriptor::Choice(f) => f.id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericQuestion {
    Age,
    StayDays,
    /// Thousands of COP per day
    DailyBudget,
    GroupSize,
    PreviousVisits,
}

impl NumericQuestion {
    pub const ALL: [NumericQuestion; NUMERIC_COUNT] = [
        NumericQuestion::Age,
        NumericQuestion::StayDays,
        NumericQuestion::DailyBudget,
        NumericQuestion::GroupSize,
        NumericQuestion::PreviousVisits,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn descriptor(self) -> &'static NumericField {
        &NUMERIC_FIELDS[self.index()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChoiceQuestion {
    TripPurpose,
    FavouriteActivity,
    Companions,
    Lodging,
    Transport,
    TimeOfDay,
    Pace,
    HistoryInterest,
    OutdoorWeather,
    SafetyPriority,
}

impl ChoiceQuestion {
    pub const ALL: [ChoiceQuestion; CHOICE_COUNT] = [
        ChoiceQuestion::TripPurpose,
        ChoiceQuestion::FavouriteActivity,
        ChoiceQuestion::Companions,
        ChoiceQuestion::Lodging,
        ChoiceQuestion::Transport,
        ChoiceQuestion::TimeOfDay,
        ChoiceQuestion::Pace,
        ChoiceQuestion::HistoryInterest,
        ChoiceQuestion::OutdoorWeather,
        ChoiceQuestion::SafetyPriority,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn descriptor(self) -> &'static ChoiceField {
        &CHOICE_FIELDS[self.index()]
    }
}

static NUMERIC_FIELDS: [NumericField; NUMERIC_COUNT] = [
    NumericField {
        id: "edad",
        prompt: "¿Cuántos años tienes?",
        min: 18,
        max: 99,
    },
    NumericField {
        id: "dias_estadia",
        prompt: "¿Cuántos días te quedarás en Bogotá?",
        min: 1,
        max: 90,
    },
    NumericField {
        id: "presupuesto_diario",
        prompt: "¿Cuál es tu presupuesto diario (miles de COP)?",
        min: 0,
        max: 5000,
    },
    NumericField {
        id: "tamano_grupo",
        prompt: "¿Cuántas personas viajan contigo, incluyéndote?",
        min: 1,
        max: 30,
    },
    NumericField {
        id: "visitas_previas",
        prompt: "¿Cuántas veces has visitado Bogotá antes?",
        min: 0,
        max: 50,
    },
];

macro_rules! options {
    ($($id:literal => $label:literal),+ $(,)?) => {
        &[$(ChoiceOption { id: $id, label: $label }),+]
    };
}

static CHOICE_FIELDS: [ChoiceField; CHOICE_COUNT] = [
    ChoiceField {
        id: "motivo_viaje",
        prompt: "¿Cuál es el motivo principal de tu viaje?",
        options: options!(
            "ocio" => "Ocio",
            "negocios" => "Negocios",
            "familia" => "Visitar familia",
            "estudios" => "Estudios",
        ),
    },
    ChoiceField {
        id: "actividad_preferida",
        prompt: "¿Qué actividad prefieres?",
        options: options!(
            "museos" => "Museos",
            "naturaleza" => "Naturaleza",
            "gastronomia" => "Gastronomía",
            "vida_nocturna" => "Vida nocturna",
            "compras" => "Compras",
        ),
    },
    ChoiceField {
        id: "acompanantes",
        prompt: "¿Con quién viajas?",
        options: options!(
            "solo" => "Solo",
            "pareja" => "En pareja",
            "amigos" => "Con amigos",
            "familia_con_ninos" => "En familia con niños",
        ),
    },
    ChoiceField {
        id: "alojamiento",
        prompt: "¿Dónde te alojas?",
        options: options!(
            "hotel" => "Hotel",
            "hostal" => "Hostal",
            "apartamento" => "Apartamento",
            "casa_familiar" => "Casa de familiares",
        ),
    },
    ChoiceField {
        id: "transporte",
        prompt: "¿Cómo te mueves por la ciudad?",
        options: options!(
            "transmilenio" => "TransMilenio",
            "taxi_app" => "Taxi o aplicación",
            "bicicleta" => "Bicicleta",
            "a_pie" => "A pie",
            "vehiculo_propio" => "Vehículo propio",
        ),
    },
    ChoiceField {
        id: "horario",
        prompt: "¿En qué momento del día prefieres salir?",
        options: options!(
            "manana" => "Mañana",
            "tarde" => "Tarde",
            "noche" => "Noche",
        ),
    },
    ChoiceField {
        id: "ritmo",
        prompt: "¿Qué ritmo de viaje prefieres?",
        options: options!(
            "tranquilo" => "Tranquilo",
            "moderado" => "Moderado",
            "intenso" => "Intenso",
        ),
    },
    ChoiceField {
        id: "interes_historia",
        prompt: "¿Qué tanto te interesa la historia de la ciudad?",
        options: options!(
            "bajo" => "Poco",
            "medio" => "Algo",
            "alto" => "Mucho",
        ),
    },
    ChoiceField {
        id: "clima_exterior",
        prompt: "¿Cómo llevas el frío y la lluvia al aire libre?",
        options: options!(
            "evita" => "Prefiero evitarlos",
            "indiferente" => "Me da igual",
            "disfruta" => "Los disfruto",
        ),
    },
    ChoiceField {
        id: "prioridad_seguridad",
        prompt: "¿Qué tan importante es la seguridad al elegir un plan?",
        options: options!(
            "baja" => "Poco importante",
            "media" => "Importante",
            "alta" => "Muy importante",
        ),
    },
];

/// All questions in form order: numeric questions first, then categorical ones.
pub fn fields() -> impl Iterator<Item = FieldDescriptor> {
    NUMERIC_FIELDS
        .iter()
        .map(FieldDescriptor::Numeric)
        .chain(CHOICE_FIELDS.iter().map(FieldDescriptor::Choice))
}

/// The value of one answered question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Answer {
    Number(i64),
    /// Index into the question's options
    Choice(usize),
}

/// Answers collected so far. Every stored answer is valid for its question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    numeric: [Option<i64>; NUMERIC_COUNT],
    choices: [Option<usize>; CHOICE_COUNT],
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a form from the raw numeric and radio inputs, in question order.
    pub fn from_inputs(
        numeric: &[Option<i64>],
        choices: &[Option<usize>],
    ) -> Result<Self, TurismoError> {
        if numeric.len() != NUMERIC_COUNT || choices.len() != CHOICE_COUNT {
            return Err(TurismoError::AnswerCountMismatch {
                expected_numeric: NUMERIC_COUNT,
                actual_numeric: numeric.len(),
                expected_choices: CHOICE_COUNT,
                actual_choices: choices.len(),
            });
        }

        let mut form = Self::new();
        for (question, value) in NumericQuestion::ALL.into_iter().zip(numeric) {
            form.set_number(question, *value)?;
        }
        for (question, value) in ChoiceQuestion::ALL.into_iter().zip(choices) {
            form.set_choice(question, *value)?;
        }
        Ok(form)
    }

    pub fn set_number(
        &mut self,
        question: NumericQuestion,
        value: Option<i64>,
    ) -> Result<(), TurismoError> {
        if let Some(v) = value {
            question.descriptor().validate(v)?;
        }
        self.numeric[question.index()] = value;
        Ok(())
    }

    pub fn set_choice(
        &mut self,
        question: ChoiceQuestion,
        value: Option<usize>,
    ) -> Result<(), TurismoError> {
        if let Some(v) = value {
            question.descriptor().validate(v)?;
        }
        self.choices[question.index()] = value;
        Ok(())
    }

    /// Select an option by its id, e.g. `"museos"`.
    pub fn set_choice_by_id(
        &mut self,
        question: ChoiceQuestion,
        option_id: &str,
    ) -> Result<(), TurismoError> {
        let descriptor = question.descriptor();
        let index = descriptor
            .position(option_id)
            .ok_or_else(|| TurismoError::InvalidUserInput {
                field: descriptor.id.to_string(),
                reason: format!("unknown option '{}'", option_id),
            })?;
        self.set_choice(question, Some(index))
    }

    pub fn number(&self, question: NumericQuestion) -> Option<i64> {
        self.numeric[question.index()]
    }

    pub fn choice(&self, question: ChoiceQuestion) -> Option<usize> {
        self.choices[question.index()]
    }

    /// Every answer in form order, `None` for unanswered questions.
    pub fn answers(&self) -> impl Iterator<Item = Option<Answer>> + '_ {
        self.numeric
            .iter()
            .map(|v| v.map(Answer::Number))
            .chain(self.choices.iter().map(|v| v.map(Answer::Choice)))
    }

    pub fn completed_count(&self) -> usize {
        self.answers().filter(Option::is_some).count()
    }

    pub fn is_complete(&self) -> bool {
        self.completed_count() == QUESTION_COUNT
    }

    /// Progress text shown under the form, e.g. `"14/15"`.
    pub fn progress(&self) -> String {
        format!("{}/{}", self.completed_count(), QUESTION_COUNT)
    }

    /// The answers with every question set, or `None` while the form is incomplete.
    pub fn complete(&self) -> Option<CompleteAnswers> {
        let mut numbers = [0; NUMERIC_COUNT];
        for (slot, value) in numbers.iter_mut().zip(self.numeric) {
            *slot = value?;
        }
        let mut choices = [0; CHOICE_COUNT];
        for (slot, value) in choices.iter_mut().zip(self.choices) {
            *slot = value?;
        }
        Some(CompleteAnswers { numbers, choices })
    }
}

/// A fully answered questionnaire. Only obtainable through [`FormState::complete`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompleteAnswers {
    numbers: [i64; NUMERIC_COUNT],
    choices: [usize; CHOICE_COUNT],
}

impl CompleteAnswers {
    pub fn number(&self, question: NumericQuestion) -> i64 {
        self.numbers[question.index()]
    }

    /// Option id of the selected answer.
    pub fn choice(&self, question: ChoiceQuestion) -> &'static str {
        question.descriptor().options[self.choices[question.index()]].id
    }

    /// The answer vector in form order.
    pub fn to_vec(&self) -> Vec<Answer> {
        self.numbers
            .iter()
            .map(|n| Answer::Number(*n))
            .chain(self.choices.iter().map(|c| Answer::Choice(*c)))
            .collect()
    }
}
