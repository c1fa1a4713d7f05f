use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use serde_json::{Value, json};
use uuid::Uuid;

use talentflow_assessments::AssessmentRuntime;
use talentflow_core::models::assessment::{Assessment, Question, QuestionKind, Section};
use talentflow_core::models::assignment::{AssessmentAssignment, AssignmentStatus};
use talentflow_core::models::candidate::{Candidate, Stage};
use talentflow_core::models::job::{Job, JobStatus};
use talentflow_core::models::response::{Answers, AssessmentResponse};
use talentflow_core::models::timeline::{TimelineEntry, TimelineKind};
use talentflow_storage::dataset::Dataset;

use crate::config::SeedConfig;
use crate::error::SeedError;
use crate::words;

const DAY_SECONDS: i64 = 86_400;

/// Produces sample data from an explicit seed.
///
/// Ids are drawn from the generator's RNG rather than the OS, and every
/// timestamp is derived from [`SeedConfig::now`], so two generators built
/// with the same seed return identical data for the same config.
pub struct SeedGenerator {
    rng: StdRng,
}

impl SeedGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Convenience for `SeedGenerator::new(config.seed).generate(config)`.
    pub fn from_config(config: &SeedConfig) -> Result<Dataset, SeedError> {
        Self::new(config.seed).generate(config)
    }

    pub fn generate(&mut self, config: &SeedConfig) -> Result<Dataset, SeedError> {
        config.check()?;
        let now = config.now;

        let jobs = (0..config.jobs)
            .map(|i| self.job(i, now))
            .collect::<Result<Vec<_>, _>>()?;

        let candidates = (0..config.candidates)
            .map(|_| self.candidate(&jobs, now))
            .collect::<Result<Vec<_>, _>>()?;

        let mut timeline = Vec::new();
        for candidate in &candidates {
            timeline.extend(self.timeline_for(candidate)?);
        }

        let mut runtimes = Vec::with_capacity(config.assessments);
        for i in 0..config.assessments {
            let job = &jobs[i % jobs.len()];
            let assessment = self.assessment(job, config.questions_per_assessment, now)?;
            runtimes.push(AssessmentRuntime::load(assessment)?);
        }

        let mut assignments = Vec::new();
        let mut responses = Vec::new();
        for runtime in &runtimes {
            let max = config.max_assignments.min(candidates.len());
            let min = config.min_assignments.min(max);
            let count = self.rng.gen_range(min..=max);
            let selected: Vec<&Candidate> =
                candidates.choose_multiple(&mut self.rng, count).collect();

            for candidate in selected {
                let roll: f64 = self.rng.r#gen();
                let mut status = if roll > 0.85 {
                    AssignmentStatus::Invited
                } else if roll > 0.25 {
                    AssignmentStatus::Registered
                } else {
                    AssignmentStatus::Started
                };
                let created_at = self.days_before(now, 90)?;

                if status.is_registered()
                    && self.rng.gen_bool(config.response_rate)
                    && let Some(response) = self.response(runtime, candidate.id, now)?
                {
                    status = AssignmentStatus::Submitted;
                    responses.push(response);
                }

                assignments.push(AssessmentAssignment {
                    id: self.uuid(),
                    assessment_id: runtime.assessment().id,
                    candidate_id: candidate.id,
                    status,
                    created_at,
                    updated_at: self.between(created_at, now)?,
                });
            }
        }

        let assessments: Vec<Assessment> =
            runtimes.iter().map(|r| r.assessment().clone()).collect();

        tracing::info!(
            jobs = jobs.len(),
            candidates = candidates.len(),
            assessments = assessments.len(),
            assignments = assignments.len(),
            responses = responses.len(),
            "sample data generated"
        );

        Ok(Dataset {
            jobs,
            candidates,
            timeline,
            assessments,
            assignments,
            responses,
        })
    }

    fn job(&mut self, index: usize, now: jiff::Timestamp) -> Result<Job, SeedError> {
        let title = self.pick(words::JOB_TITLES).to_string();
        let tag_count = self.rng.gen_range(2..=5);
        let tags = words::TAGS
            .choose_multiple(&mut self.rng, tag_count)
            .map(|t| t.to_string())
            .collect();
        let status = if self.rng.gen_bool(0.5) {
            JobStatus::Active
        } else {
            JobStatus::Archived
        };
        let created_at = self.days_before(now, 730)?;

        Ok(Job {
            id: self.uuid(),
            slug: Job::slugify(&title),
            title,
            status,
            tags,
            milestones: words::MILESTONES.iter().map(|m| m.to_string()).collect(),
            order_index: index as u32,
            created_at,
            updated_at: self.between(created_at, now)?,
        })
    }

    fn candidate(&mut self, jobs: &[Job], now: jiff::Timestamp) -> Result<Candidate, SeedError> {
        let first = self.pick(words::FIRST_NAMES);
        let last = self.pick(words::LAST_NAMES);
        let suffix: u16 = self.rng.gen_range(1..1000);
        let job_id = jobs[self.rng.gen_range(0..jobs.len())].id;
        let location = self.pick(words::LOCATIONS).to_string();
        let stage = Stage::ALL[self.rng.gen_range(0..Stage::ALL.len())];
        let created_at = self.days_before(now, 365)?;

        Ok(Candidate {
            id: self.uuid(),
            name: format!("{first} {last}"),
            email: format!(
                "{}.{}{suffix}@example.com",
                first.to_lowercase(),
                last.to_lowercase()
            ),
            job_id,
            location: Some(location),
            stage,
            created_at,
            updated_at: self.between(created_at, now)?,
        })
    }

    /// "Applied" entry, one entry per stage transition up to the current
    /// stage, and sometimes a note.
    fn timeline_for(&mut self, candidate: &Candidate) -> Result<Vec<TimelineEntry>, SeedError> {
        let mut entries = vec![TimelineEntry {
            id: self.uuid(),
            candidate_id: candidate.id,
            change: "Applied for position".to_string(),
            timestamp: candidate.created_at,
            kind: TimelineKind::StageChange,
        }];

        let reached = Stage::ALL
            .iter()
            .position(|s| *s == candidate.stage)
            .unwrap_or(0);
        for pair in Stage::ALL[..=reached].windows(2) {
            entries.push(TimelineEntry {
                id: self.uuid(),
                candidate_id: candidate.id,
                change: format!("Moved from {} to {}", pair[0].as_str(), pair[1].as_str()),
                timestamp: self.between(candidate.created_at, candidate.updated_at)?,
                kind: TimelineKind::StageChange,
            });
        }

        if self.rng.gen_bool(0.5) {
            entries.push(TimelineEntry {
                id: self.uuid(),
                candidate_id: candidate.id,
                change: self.sentence(),
                timestamp: self.between(candidate.created_at, candidate.updated_at)?,
                kind: TimelineKind::Note,
            });
        }

        Ok(entries)
    }

    fn assessment(
        &mut self,
        job: &Job,
        questions: usize,
        now: jiff::Timestamp,
    ) -> Result<Assessment, SeedError> {
        let mut section = Section::new(self.uuid().to_string(), "General Questions");
        for _ in 0..questions {
            section.questions.push(self.question()?);
        }
        let created_at = self.days_before(now, 365)?;

        Ok(Assessment {
            id: self.uuid(),
            job_id: job.id,
            title: format!("{} Assessment", job.title),
            description: Some(self.sentence()),
            sections: vec![section],
            created_at,
            updated_at: self.between(created_at, now)?,
        })
    }

    fn question(&mut self) -> Result<Question, SeedError> {
        let kind = match self.rng.gen_range(0..6) {
            0 => {
                let options = self.options();
                QuestionKind::single_choice(options)?
            }
            1 => {
                let options = self.options();
                QuestionKind::multi_choice(options)?
            }
            2 => QuestionKind::short_text(Some(self.rng.gen_range(50..=1000))),
            3 => QuestionKind::long_text(Some(self.rng.gen_range(50..=1000))),
            4 => {
                let min: u32 = self.rng.gen_range(0..=10);
                let max = min + self.rng.gen_range(5..=100);
                QuestionKind::numeric(Some(f64::from(min)), Some(f64::from(max)))?
            }
            _ => QuestionKind::FileUpload,
        };

        let title = self.sentence().trim_end_matches('.').to_string();
        let mut question = Question::new(self.uuid().to_string(), title, kind);
        question.required = self.rng.gen_bool(0.5);
        Ok(question)
    }

    fn options(&mut self) -> Vec<String> {
        let count = self.rng.gen_range(3..=6);
        (0..count).map(|_| self.words(1, 3)).collect()
    }

    /// A response whose answers pass the assessment's own validators, or
    /// `None` if the drawn answers did not.
    fn response(
        &mut self,
        runtime: &AssessmentRuntime,
        candidate_id: Uuid,
        now: jiff::Timestamp,
    ) -> Result<Option<AssessmentResponse>, SeedError> {
        let mut answers = Answers::new();
        for question in runtime.assessment().questions() {
            if !question.required && !self.rng.gen_bool(0.7) {
                continue;
            }
            answers.insert(question.id.clone(), self.answer(&question.kind));
        }

        if let Err(errors) = runtime.validate(&answers) {
            tracing::warn!(
                assessment_id = %runtime.assessment().id,
                errors = errors.len(),
                "generated answers failed validation, skipping response"
            );
            return Ok(None);
        }

        Ok(Some(AssessmentResponse {
            id: self.uuid(),
            assessment_id: runtime.assessment().id,
            candidate_id,
            responses: runtime.retained_answers(&answers),
            submitted_at: self.days_before(now, 20)?,
        }))
    }

    fn answer(&mut self, kind: &QuestionKind) -> Value {
        match kind {
            QuestionKind::SingleChoice { options } => options
                .choose(&mut self.rng)
                .map(|o| json!(o))
                .unwrap_or(Value::Null),
            QuestionKind::MultiChoice { options } => {
                if options.is_empty() {
                    return json!([]);
                }
                let count = self.rng.gen_range(1..=options.len());
                let picked: Vec<&String> = options.choose_multiple(&mut self.rng, count).collect();
                json!(picked)
            }
            QuestionKind::ShortText { max_length } | QuestionKind::LongText { max_length } => {
                let text = self.words(2, 8);
                let text: String = match max_length {
                    Some(n) => text.chars().take(*n).collect(),
                    None => text,
                };
                json!(text)
            }
            QuestionKind::Numeric { min, max } => {
                let lo = min.unwrap_or(0.0).ceil() as i64;
                let hi = max.unwrap_or(lo as f64 + 100.0).floor() as i64;
                if lo > hi {
                    json!(min.unwrap_or(0.0))
                } else {
                    json!(self.rng.gen_range(lo..=hi))
                }
            }
            QuestionKind::FileUpload => json!(self.pick(words::UPLOADS)),
            QuestionKind::Unsupported => json!(self.words(1, 3)),
        }
    }

    fn uuid(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }

    fn pick(&mut self, items: &[&'static str]) -> &'static str {
        items[self.rng.gen_range(0..items.len())]
    }

    fn words(&mut self, min: usize, max: usize) -> String {
        let count = self.rng.gen_range(min..=max);
        (0..count)
            .map(|_| self.pick(words::LOREM))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn sentence(&mut self) -> String {
        let text = self.words(4, 10);
        let mut chars = text.chars();
        match chars.next() {
            Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
            None => String::new(),
        }
    }

    fn days_before(
        &mut self,
        now: jiff::Timestamp,
        days: i64,
    ) -> Result<jiff::Timestamp, SeedError> {
        let offset = self.rng.gen_range(0..=days * DAY_SECONDS);
        Ok(now.checked_sub(jiff::SignedDuration::from_secs(offset))?)
    }

    fn between(
        &mut self,
        start: jiff::Timestamp,
        end: jiff::Timestamp,
    ) -> Result<jiff::Timestamp, SeedError> {
        let span = end.as_second() - start.as_second();
        if span <= 0 {
            return Ok(start);
        }
        let offset = self.rng.gen_range(0..=span);
        Ok(jiff::Timestamp::from_second(start.as_second() + offset)?)
    }
}
