// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Subject and exam catalog
//!
//! The catalog is the tree the GUI renders on the Questions page:
//!
//! ```text
//! Onderdelen
//!   ├─ Wetgeving
//!   │    ├─ Question 1
//!   │    └─ Question 2
//!   └─ Voorrang
//! Examens
//!   ├─ Examen 1: Gevaarherkenning
//!   ├─ Examen 1: Inzicht
//!   └─ Examen 1: Kennis
//! ```
//!
//! It is rebuilt from API responses and patched in place after each
//! successful create/update/delete, so the view never has to re-download
//! everything after a single edit.

use serde::{Deserialize, Serialize};

use crate::core::types::{ExamCategory, Question, QuestionParent, QuestionType};

/// Header of the subjects group
pub const SUBJECTS_GROUP: &str = "Onderdelen";

/// Header of the exams group
pub const EXAMS_GROUP: &str = "Examens";

/// Subject ("onderdeel") with its questions
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// Document id
    pub id: String,
    /// Title, also used as the parent string for new questions
    #[serde(default)]
    pub title: String,
    /// Ordered question ids
    #[serde(default)]
    pub question_ids: Vec<String>,
    /// Resolved questions
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// One category of an exam
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamSection {
    /// Ordered question ids
    #[serde(default)]
    pub question_ids: Vec<String>,
    /// Resolved questions (missing documents are skipped by the API)
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// Exam with its three categories
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Exam {
    /// Document id, which is the exam number
    pub id: String,
    #[serde(default)]
    pub gevaarherkenning: ExamSection,
    #[serde(default)]
    pub inzicht: ExamSection,
    #[serde(default)]
    pub kennis: ExamSection,
}

impl Exam {
    /// Returns the section for a category
    pub fn section(&self, category: ExamCategory) -> &ExamSection {
        match category {
            ExamCategory::HazardPerception => &self.gevaarherkenning,
            ExamCategory::Insight => &self.inzicht,
            ExamCategory::Knowledge => &self.kennis,
        }
    }

    /// Returns the section for a category, mutably
    pub fn section_mut(&mut self, category: ExamCategory) -> &mut ExamSection {
        match category {
            ExamCategory::HazardPerception => &mut self.gevaarherkenning,
            ExamCategory::Insight => &mut self.inzicht,
            ExamCategory::Knowledge => &mut self.kennis,
        }
    }

    /// Parent of questions in one of this exam's sections
    pub fn parent(&self, category: ExamCategory) -> QuestionParent {
        QuestionParent::Exam {
            number: self.id.clone(),
            category,
        }
    }
}

/// Cursor pagination returned by list endpoints
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Token for the next page (id of the last document)
    #[serde(default)]
    pub next_page_token: Option<String>,
    /// Effective page size after server clamping
    #[serde(default)]
    pub page_size: u32,
    /// Whether another page may exist
    #[serde(default)]
    pub has_more: bool,
}

/// One page of `getAllSubjects`
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct SubjectsPage {
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// Response of `getAllExams`
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ExamsResponse {
    #[serde(default)]
    pub exams: Vec<Exam>,
}

/// One row of the flattened catalog tree
#[derive(Clone, Debug, PartialEq)]
pub enum CatalogNode {
    /// Top level header ("Onderdelen" / "Examens")
    Group { title: String },
    /// Subject or exam section
    Section {
        title: String,
        parent: QuestionParent,
        count: usize,
    },
    /// A question inside a section
    Question {
        parent: QuestionParent,
        /// Position within its section (stable under filtering)
        index: usize,
        question: Question,
    },
}

impl CatalogNode {
    /// Nesting depth (0 = group, 1 = section, 2 = question)
    pub fn depth(&self) -> u8 {
        match self {
            CatalogNode::Group { .. } => 0,
            CatalogNode::Section { .. } => 1,
            CatalogNode::Question { .. } => 2,
        }
    }

    /// Text shown in the list row
    pub fn label(&self) -> String {
        match self {
            CatalogNode::Group { title } => title.clone(),
            CatalogNode::Section { title, count, .. } => format!("{} ({})", title, count),
            CatalogNode::Question { index, .. } => format!("Question {}", index + 1),
        }
    }

    /// The question, if this row is a question
    pub fn question(&self) -> Option<&Question> {
        match self {
            CatalogNode::Question { question, .. } => Some(question),
            _ => None,
        }
    }

    /// Parent of the section or question
    pub fn parent(&self) -> Option<&QuestionParent> {
        match self {
            CatalogNode::Group { .. } => None,
            CatalogNode::Section { parent, .. } | CatalogNode::Question { parent, .. } => {
                Some(parent)
            }
        }
    }
}

/// Mutable tree of subjects and exams
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Catalog {
    subjects: Vec<Subject>,
    exams: Vec<Exam>,
}

impl Catalog {
    /// Creates a catalog from API data
    pub fn new(subjects: Vec<Subject>, exams: Vec<Exam>) -> Self {
        Self { subjects, exams }
    }

    /// Loaded subjects
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    /// Loaded exams
    pub fn exams(&self) -> &[Exam] {
        &self.exams
    }

    /// Replaces all subjects (after a reload)
    pub fn set_subjects(&mut self, subjects: Vec<Subject>) {
        self.subjects = subjects;
    }

    /// Replaces all exams (after a reload)
    pub fn set_exams(&mut self, exams: Vec<Exam>) {
        self.exams = exams;
    }

    /// Total number of questions across all sections
    ///
    /// A question linked from several sections is counted once per section.
    pub fn question_count(&self) -> usize {
        let in_subjects: usize = self.subjects.iter().map(|s| s.questions.len()).sum();
        let in_exams: usize = self
            .exams
            .iter()
            .flat_map(|exam| ExamCategory::ALL.map(|c| exam.section(c).questions.len()))
            .sum();
        in_subjects + in_exams
    }

    /// Every parent a new question can be attached to
    pub fn parents(&self) -> Vec<QuestionParent> {
        let mut parents: Vec<QuestionParent> = self
            .subjects
            .iter()
            .map(|s| QuestionParent::Subject(s.title.clone()))
            .collect();

        for exam in &self.exams {
            for category in ExamCategory::ALL {
                parents.push(exam.parent(category));
            }
        }

        parents
    }

    /// Flattens the whole tree depth-first
    pub fn nodes(&self) -> Vec<CatalogNode> {
        self.collect_nodes(None)
    }

    /// Flattens the tree keeping only questions matching `query`
    ///
    /// Matching is case-insensitive on question text, explanation, terms
    /// and type label. Sections and groups without matches are dropped. An empty
    /// query returns the full tree.
    pub fn filter(&self, query: &str) -> Vec<CatalogNode> {
        if query.trim().is_empty() {
            return self.nodes();
        }
        self.collect_nodes(Some(&query.trim().to_lowercase()))
    }

    fn collect_nodes(&self, query: Option<&str>) -> Vec<CatalogNode> {
        let mut nodes = Vec::new();

        let mut subject_nodes = Vec::new();
        for subject in &self.subjects {
            let parent = QuestionParent::Subject(subject.title.clone());
            push_section(&mut subject_nodes, &subject.title, parent, &subject.questions, query);
        }
        if query.is_none() || !subject_nodes.is_empty() {
            nodes.push(CatalogNode::Group {
                title: SUBJECTS_GROUP.to_string(),
            });
            nodes.append(&mut subject_nodes);
        }

        let mut exam_nodes = Vec::new();
        for exam in &self.exams {
            for category in ExamCategory::ALL {
                let parent = exam.parent(category);
                let title = parent.to_string();
                push_section(&mut exam_nodes, &title, parent, &exam.section(category).questions, query);
            }
        }
        if query.is_none() || !exam_nodes.is_empty() {
            nodes.push(CatalogNode::Group {
                title: EXAMS_GROUP.to_string(),
            });
            nodes.append(&mut exam_nodes);
        }

        nodes
    }

    /// Finds a question by id, with the parent of its first location
    pub fn find_question(&self, id: &str) -> Option<(QuestionParent, &Question)> {
        for subject in &self.subjects {
            if let Some(q) = subject.questions.iter().find(|q| q.id.as_deref() == Some(id)) {
                return Some((QuestionParent::Subject(subject.title.clone()), q));
            }
        }

        for exam in &self.exams {
            for category in ExamCategory::ALL {
                let section = exam.section(category);
                if let Some(q) = section.questions.iter().find(|q| q.id.as_deref() == Some(id)) {
                    return Some((exam.parent(category), q));
                }
            }
        }

        None
    }

    /// Appends a question to the section identified by `parent`
    ///
    /// # Returns
    ///
    /// * `true` - Question inserted
    /// * `false` - No subject or exam section matches `parent`
    pub fn insert_question(&mut self, parent: &QuestionParent, question: Question) -> bool {
        let section = match parent {
            QuestionParent::Subject(title) => self
                .subjects
                .iter_mut()
                .find(|s| &s.title == title)
                .map(|s| (&mut s.question_ids, &mut s.questions)),
            QuestionParent::Exam { number, category } => self
                .exams
                .iter_mut()
                .find(|e| &e.id == number)
                .map(|e| {
                    let section = e.section_mut(*category);
                    (&mut section.question_ids, &mut section.questions)
                }),
        };

        match section {
            Some((ids, questions)) => {
                if let Some(id) = &question.id {
                    if !ids.contains(id) {
                        ids.push(id.clone());
                    }
                }
                questions.push(question);
                true
            }
            None => false,
        }
    }

    /// Replaces every copy of a question (matched by id)
    ///
    /// # Returns
    ///
    /// Number of locations updated (0 if the id is unknown or missing)
    pub fn replace_question(&mut self, question: &Question) -> usize {
        let Some(id) = question.id.clone() else {
            return 0;
        };

        let mut replaced = 0;
        self.for_each_section_mut(|_, questions| {
            for existing in questions.iter_mut() {
                if existing.id.as_deref() == Some(id.as_str()) {
                    *existing = question.clone();
                    replaced += 1;
                }
            }
        });
        replaced
    }

    /// Removes a question from every location
    ///
    /// # Returns
    ///
    /// Number of locations the question was removed from
    pub fn remove_question(&mut self, id: &str) -> usize {
        let mut removed = 0;
        self.for_each_section_mut(|ids, questions| {
            let before = questions.len();
            questions.retain(|q| q.id.as_deref() != Some(id));
            removed += before - questions.len();
            ids.retain(|existing| existing != id);
        });
        removed
    }

    fn for_each_section_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Vec<String>, &mut Vec<Question>),
    {
        for subject in &mut self.subjects {
            f(&mut subject.question_ids, &mut subject.questions);
        }
        for exam in &mut self.exams {
            for category in ExamCategory::ALL {
                let section = exam.section_mut(category);
                f(&mut section.question_ids, &mut section.questions);
            }
        }
    }
}

/// Pushes a section header plus its (matching) questions
fn push_section(
    nodes: &mut Vec<CatalogNode>,
    title: &str,
    parent: QuestionParent,
    questions: &[Question],
    query: Option<&str>,
) {
    let matching: Vec<(usize, &Question)> = questions
        .iter()
        .enumerate()
        .filter(|(_, q)| query.is_none_or(|query| matches_query(q, query)))
        .collect();

    if query.is_some() && matching.is_empty() {
        return;
    }

    nodes.push(CatalogNode::Section {
        title: title.to_string(),
        parent: parent.clone(),
        count: matching.len(),
    });

    for (index, question) in matching {
        nodes.push(CatalogNode::Question {
            parent: parent.clone(),
            index,
            question: question.clone(),
        });
    }
}

/// Case-insensitive match on text, explanation, terms and type label
///
/// `query` must already be lowercase.
fn matches_query(question: &Question, query: &str) -> bool {
    if question.text.to_lowercase().contains(query) {
        return true;
    }

    if let Some(explanation) = &question.explanation {
        if explanation.to_lowercase().contains(query) {
            return true;
        }
    }

    if question.terms.iter().any(|term| term.to_lowercase().contains(query)) {
        return true;
    }

    let kind: QuestionType = question.kind;
    kind.label().to_lowercase().contains(query) || kind.tag().contains(query)
}
