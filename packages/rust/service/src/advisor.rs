//! Per-message request handling.

use tracing::debug;

use crate::electives::{ElectiveTable, parse_role_request};
use crate::index::CurriculumIndex;
use crate::screen::{command_name, is_recommendation_request, is_relevant, resolve_program};

const GREETING: &str = "Привет! Я бот-консультант по магистратурам ИТМО: AI и AI Product. \
Задавай вопросы о учебных планах, курсах и рекомендациях. Отвечаю только на релевантные вопросы.";

const REFUSAL: &str = "Извините, я могу отвечать только на вопросы, связанные с учебными планами, \
курсами и выбором дисциплин по программам AI и AI Product.";

const NO_MATCH: &str = "Не нашёл прямого совпадения в учебном плане. \
Могу помочь с общими рекомендациями или перечислить основные блоки программы.";

const MATCHES_HEADER: &str = "Нашёл в учебном плане (строки):";

const RECOMMENDATIONS_HEADER: &str = "Рекомендованные выборные дисциплины:";

/// Answer to one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Response to `/start`.
    Greeting,
    /// The message failed the relevance screen.
    Refusal,
    /// Curriculum lines containing the query.
    Matches(Vec<String>),
    /// Electives for the resolved role.
    Recommendations(Vec<String>),
    /// Retrieval found nothing.
    NoMatch,
}

impl Reply {
    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Reply::Greeting => "greeting",
            Reply::Refusal => "refusal",
            Reply::Matches(_) => "matches",
            Reply::Recommendations(_) => "recommendations",
            Reply::NoMatch => "no_match",
        }
    }

    /// User-facing text.
    pub fn render(&self) -> String {
        match self {
            Reply::Greeting => GREETING.to_string(),
            Reply::Refusal => REFUSAL.to_string(),
            Reply::NoMatch => NO_MATCH.to_string(),
            Reply::Matches(lines) => format!("{MATCHES_HEADER}\n{}", lines.join("\n")),
            Reply::Recommendations(electives) => {
                let items: Vec<String> = electives.iter().map(|e| format!("- {e}")).collect();
                format!("{RECOMMENDATIONS_HEADER}\n{}", items.join("\n"))
            }
        }
    }
}

/// Stateless message handler over an immutable curriculum snapshot.
#[derive(Debug, Clone, Default)]
pub struct Advisor {
    index: CurriculumIndex,
    electives: ElectiveTable,
}

impl Advisor {
    pub fn new(index: CurriculumIndex, electives: ElectiveTable) -> Self {
        Self { index, electives }
    }

    pub fn index(&self) -> &CurriculumIndex {
        &self.index
    }

    /// Handle one message. Commands other than `/start` get no reply.
    pub fn handle(&self, text: &str) -> Option<Reply> {
        match command_name(text) {
            Some("start") => Some(Reply::Greeting),
            Some(other) => {
                debug!(command = other, "ignoring unknown command");
                None
            }
            None => Some(self.answer(text)),
        }
    }

    /// Answer a free-text question.
    pub fn answer(&self, text: &str) -> Reply {
        if !is_relevant(text) {
            debug!("message rejected by relevance screen");
            return Reply::Refusal;
        }

        let program = resolve_program(text);

        if is_recommendation_request(text) {
            let request = parse_role_request(text);
            debug!(%program, route = "recommendation", "routing message");
            return Reply::Recommendations(self.electives.recommend(&request));
        }

        debug!(%program, route = "retrieval", "routing message");
        let found = self.index.search(program, text);
        if found.is_empty() {
            Reply::NoMatch
        } else {
            Reply::Matches(found)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itmo_advisor_shared::{CourseRecord, CurriculumStore, DocumentCourses, Program};

    fn advisor_with(program: Program, lines: &[&str]) -> Advisor {
        let mut store = CurriculumStore::new();
        store.insert(
            program,
            vec![DocumentCourses {
                file_id: "doc".into(),
                courses: lines
                    .iter()
                    .map(|l| CourseRecord { raw: (*l).into() })
                    .collect(),
            }],
        );
        Advisor::new(CurriculumIndex::new(store), ElectiveTable::default())
    }

    #[test]
    fn start_command_greets() {
        let advisor = Advisor::default();
        assert_eq!(advisor.handle("/start"), Some(Reply::Greeting));
        assert_eq!(advisor.handle("/help"), None);
    }

    #[test]
    fn slash_prefixed_question_reaches_retrieval() {
        let advisor = Advisor::default();
        assert_eq!(advisor.handle("/курсы первого семестра"), Some(Reply::NoMatch));

        let advisor = advisor_with(Program::Ai, &["/курсы первого семестра 3 зач"]);
        assert_eq!(
            advisor.handle("/курсы первого семестра"),
            Some(Reply::Matches(vec!["/курсы первого семестра 3 зач".into()]))
        );
    }

    #[test]
    fn irrelevant_message_is_refused() {
        // The line would match as a substring, but the screen runs first.
        let advisor = advisor_with(Program::Ai, &["как дела"]);
        assert_eq!(advisor.handle("как дела"), Some(Reply::Refusal));
        assert_eq!(advisor.answer("recommend me something"), Reply::Refusal);
    }

    #[test]
    fn elective_question_gets_ml_engineer_list() {
        let reply = Advisor::default().answer("какие выборные дисциплины мне подходят? -> ml engineer");
        assert_eq!(
            reply,
            Reply::Recommendations(vec![
                "MLOps".into(),
                "ML System Design".into(),
                "Optimization Methods".into(),
                "Deep Learning".into(),
            ])
        );
        assert_eq!(
            reply.render(),
            "Рекомендованные выборные дисциплины:\n- MLOps\n- ML System Design\n- Optimization Methods\n- Deep Learning"
        );
    }

    #[test]
    fn retrieval_matches_whole_message_text() {
        let advisor = advisor_with(
            Program::Ai,
            &["Семестр 1: курс Python 3 зач", "Семестр 2: Deep Learning 6 зач"],
        );
        assert_eq!(
            advisor.answer("КУРС PYTHON"),
            Reply::Matches(vec!["Семестр 1: курс Python 3 зач".into()])
        );
        assert_eq!(advisor.answer("курс по Rust"), Reply::NoMatch);
    }

    #[test]
    fn product_messages_search_product_track() {
        let advisor = advisor_with(Program::AiProduct, &["1. product курс 3 зач"]);
        assert_eq!(
            advisor.answer("product курс"),
            Reply::Matches(vec!["1. product курс 3 зач".into()])
        );

        let advisor = advisor_with(Program::Ai, &["1. product курс 3 зач"]);
        assert_eq!(advisor.answer("product курс"), Reply::NoMatch);
    }

    #[test]
    fn empty_store_answers_no_match() {
        let reply = Advisor::default().answer("учебный план");
        assert_eq!(reply, Reply::NoMatch);
        assert!(reply.render().starts_with("Не нашёл"));
    }

    #[test]
    fn matches_render_one_line_each() {
        let reply = Reply::Matches(vec!["a".into(), "b".into()]);
        assert_eq!(reply.render(), "Нашёл в учебном плане (строки):\na\nb");
    }
}
