use std::sync::Arc;
use std::time::Duration;

use chorus_db::{Database, NewPost};
use chorus_llm::ReplyGenerator;
use chorus_personas::templates::fallback_reply;
use chorus_personas::{Personality, PersonalityRegistry};
use chorus_types::models::Message;
use rand::Rng;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::thread::{resolve_context, thread_root};

/// Tuning for automated replies.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Chance that a fresh post gets an automated reply at all.
    pub reply_probability: f64,
    pub min_delay: Duration,
    pub max_delay: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            reply_probability: 0.8,
            min_delay: Duration::from_secs(5),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl SchedulerConfig {
    /// Clamp the probability into [0, 1] and order the delay window.
    fn normalized(mut self) -> Self {
        self.reply_probability = if self.reply_probability.is_nan() {
            0.0
        } else {
            self.reply_probability.clamp(0.0, 1.0)
        };
        if self.min_delay > self.max_delay {
            std::mem::swap(&mut self.min_delay, &mut self.max_delay);
        }
        self
    }
}

/// An eligible trigger: who answers, and after how long.
#[derive(Debug, Clone)]
pub struct ReplyPlan {
    pub post: Message,
    pub personality: Personality,
    pub delay: Duration,
}

/// Terminal state of one scheduled reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    Suppressed,
    Committed {
        reply_id: i64,
        personality: &'static str,
        used_fallback: bool,
    },
    Failed,
}

/// Decides whether a post gets an automated reply and runs the reply on its
/// own task after a randomized delay.
#[derive(Clone)]
pub struct ReplyScheduler {
    inner: Arc<SchedulerInner>,
}

struct SchedulerInner {
    db: Arc<Database>,
    registry: Arc<PersonalityRegistry>,
    generator: Arc<dyn ReplyGenerator>,
    config: SchedulerConfig,
}

impl ReplyScheduler {
    pub fn new(
        db: Arc<Database>,
        registry: Arc<PersonalityRegistry>,
        generator: Arc<dyn ReplyGenerator>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            inner: Arc::new(SchedulerInner {
                db,
                registry,
                generator,
                config: config.normalized(),
            }),
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.inner.config
    }

    /// Fire-and-forget entry point for a freshly created post. The returned
    /// handle resolves to the terminal outcome; dropping it does not cancel
    /// the reply.
    pub fn schedule(&self, post: Message) -> JoinHandle<ReplyOutcome> {
        let this = self.clone();
        tokio::spawn(async move { this.run(post).await })
    }

    async fn run(&self, post: Message) -> ReplyOutcome {
        let post_id = post.id;
        let messages = match self.load_latest().await {
            Some(messages) => messages,
            None => return ReplyOutcome::Failed,
        };

        let Some(plan) = self.evaluate(&post, &messages) else {
            info!("Automated reply to post {} suppressed", post_id);
            return ReplyOutcome::Suppressed;
        };

        debug!(
            "Reply to post {} scheduled: {} in {:?}",
            post_id, plan.personality.name, plan.delay
        );
        tokio::time::sleep(plan.delay).await;

        self.execute(plan).await
    }

    /// Eligibility decision for `post` against the state it was created in.
    ///
    /// - Automated posts never trigger a reply.
    /// - A reply to an automated message is answered by that message's
    ///   personality, without a roll; unknown personalities suppress.
    /// - Anything else rolls `reply_probability` and picks a personality at
    ///   random.
    pub fn evaluate(&self, post: &Message, messages: &[Message]) -> Option<ReplyPlan> {
        if post.is_automated {
            debug!("Post {} is automated, not rolling", post.id);
            return None;
        }

        let parent = post
            .parent_id
            .and_then(|pid| messages.iter().find(|m| m.id == pid));

        let personality = match parent {
            Some(parent) if parent.is_automated => {
                match self.inner.registry.find_by_name(&parent.created_by) {
                    Some(p) => p.clone(),
                    None => {
                        warn!(
                            "Post {} replies to unknown personality '{}'",
                            post.id, parent.created_by
                        );
                        return None;
                    }
                }
            }
            _ => {
                let mut rng = rand::rng();
                if !rng.random_bool(self.inner.config.reply_probability) {
                    debug!("Eligibility roll for post {} failed", post.id);
                    return None;
                }
                self.inner.registry.pick_random()?.clone()
            }
        };

        Some(ReplyPlan {
            post: post.clone(),
            personality,
            delay: self.random_delay(),
        })
    }

    fn random_delay(&self) -> Duration {
        let min = self.inner.config.min_delay.as_millis() as u64;
        let max = self.inner.config.max_delay.as_millis() as u64;
        Duration::from_millis(rand::rng().random_range(min..=max))
    }

    /// Generate and commit the reply for `plan`, working from the state as
    /// it is now rather than when the plan was made.
    pub async fn execute(&self, plan: ReplyPlan) -> ReplyOutcome {
        let ReplyPlan {
            post, personality, ..
        } = plan;

        let Some(messages) = self.load_latest().await else {
            return ReplyOutcome::Failed;
        };

        let anchor = thread_root(post.id, &messages).unwrap_or(post.id);
        let context = resolve_context(Some(anchor), &messages);

        let generated = self
            .inner
            .generator
            .generate(&personality, &post.content, &context, &post.created_by)
            .await;

        let (content, used_fallback) = match generated {
            Ok(text) if !text.trim().is_empty() => (text, false),
            Ok(_) => {
                warn!("{} produced an empty reply, using fallback", self.inner.generator.name());
                (fallback_reply(&personality), true)
            }
            Err(e) => {
                warn!("Reply generation for post {} failed: {}", post.id, e);
                (fallback_reply(&personality), true)
            }
        };

        let db = self.inner.db.clone();
        let new_post = NewPost::automated(
            content,
            personality.name,
            personality.style.as_str(),
            Some(anchor),
        );
        let reply = match tokio::task::spawn_blocking(move || db.create_post(new_post)).await {
            Ok(Ok(reply)) => reply,
            Ok(Err(e)) => {
                error!("Failed to commit automated reply to post {}: {}", post.id, e);
                return ReplyOutcome::Failed;
            }
            Err(e) => {
                error!("spawn_blocking join error: {}", e);
                return ReplyOutcome::Failed;
            }
        };

        let db = self.inner.db.clone();
        let text = format!("{} replied to {}'s post", personality.name, post.created_by);
        let post_id = post.id;
        match tokio::task::spawn_blocking(move || db.push_notification(&text, Some(post_id))).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => error!("Failed to record notification for post {}: {}", post_id, e),
            Err(e) => error!("spawn_blocking join error: {}", e),
        }

        info!(
            "{} replied to post {} with post {}{}",
            personality.name,
            post_id,
            reply.id,
            if used_fallback { " (fallback)" } else { "" }
        );

        ReplyOutcome::Committed {
            reply_id: reply.id,
            personality: personality.name,
            used_fallback,
        }
    }

    async fn load_latest(&self) -> Option<Vec<Message>> {
        let db = self.inner.db.clone();
        match tokio::task::spawn_blocking(move || db.latest()).await {
            Ok(Ok(messages)) => Some(messages),
            Ok(Err(e)) => {
                error!("Failed to read latest state: {}", e);
                None
            }
            Err(e) => {
                error!("spawn_blocking join error: {}", e);
                None
            }
        }
    }
}
