use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::games::snake::ScoreEligibility;
use crate::{PlayerName, log};
use super::gateway::{GatewayError, ScoreGateway};
use super::types::{LeaderboardEntry, ScoreSubmission};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReport {
    pub submission: ScoreSubmission,
    pub result: Result<LeaderboardEntry, GatewayError>,
}

/// Sends scores to a gateway on background tasks. Results come back on the
/// report channel; nothing is ever awaited on the caller's side.
#[derive(Clone)]
pub struct ScoreSubmitter<G: ScoreGateway> {
    gateway: G,
    reports: mpsc::UnboundedSender<SubmissionReport>,
}

impl<G: ScoreGateway> ScoreSubmitter<G> {
    pub fn new(gateway: G) -> (Self, mpsc::UnboundedReceiver<SubmissionReport>) {
        let (reports, reports_rx) = mpsc::unbounded_channel();
        (Self { gateway, reports }, reports_rx)
    }

    /// Each call is an independent request; a failed one can simply be
    /// submitted again.
    pub fn submit(&self, identity: &PlayerName, score: u32) -> JoinHandle<()> {
        let submission = ScoreSubmission::new(identity.as_str(), i64::from(score));
        let gateway = self.gateway.clone();
        let reports = self.reports.clone();

        tokio::spawn(async move {
            let result = gateway.submit(submission.clone()).await;
            if let Err(ref e) = result {
                log!("Score submission for {} failed: {}", submission.identity, e);
            }
            let _ = reports.send(SubmissionReport { submission, result });
        })
    }

    /// Submits straight away when the game already knows who played.
    pub fn submit_if_ready(&self, eligibility: &ScoreEligibility) -> Option<JoinHandle<()>> {
        match eligibility {
            ScoreEligibility::ReadyToSubmit { identity, score } => Some(self.submit(identity, *score)),
            ScoreEligibility::IdentityRequired { .. } | ScoreEligibility::NotFinished => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::{InMemoryScoreStore, Leaderboard, LeaderboardSettings};

    fn submitter() -> (
        ScoreSubmitter<Leaderboard<InMemoryScoreStore>>,
        mpsc::UnboundedReceiver<SubmissionReport>,
        Leaderboard<InMemoryScoreStore>,
    ) {
        let board = Leaderboard::new(InMemoryScoreStore::new(), LeaderboardSettings::default());
        let (submitter, reports) = ScoreSubmitter::new(board.clone());
        (submitter, reports, board)
    }

    #[tokio::test]
    async fn test_submit_reports_created_entry() {
        let (submitter, mut reports, board) = submitter();
        let ann = PlayerName::parse("Ann", 32).unwrap();

        submitter.submit(&ann, 120).await.unwrap();

        let report = reports.recv().await.unwrap();
        assert_eq!(report.result.unwrap().score, 120);
        assert_eq!(board.top_scores().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_if_ready_only_with_identity() {
        let (submitter, mut reports, _) = submitter();

        assert!(submitter
            .submit_if_ready(&ScoreEligibility::IdentityRequired { score: 40 })
            .is_none());
        assert!(submitter.submit_if_ready(&ScoreEligibility::NotFinished).is_none());

        let eligibility = ScoreEligibility::ReadyToSubmit {
            identity: PlayerName::parse("Bob", 32).unwrap(),
            score: 40,
        };
        submitter.submit_if_ready(&eligibility).unwrap().await.unwrap();

        let report = reports.recv().await.unwrap();
        assert_eq!(report.submission, ScoreSubmission::new("Bob", 40));
        assert!(report.result.is_ok());
    }
}
