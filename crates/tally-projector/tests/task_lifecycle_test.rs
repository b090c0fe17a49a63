//! Tests for task event handlers

mod common;

use common::*;
use tally_core::{
    Amount, EntityStore, GlobalStats, MemoryStore, Task, UserAchievements, UserDashStats,
    UserFavStats, UserTask, GLOBAL_STATS_KEY,
};
use tally_projector::Projector;

const INITIATOR: &str = "0x1111111111111111111111111111111111111111";
const RECIPIENT: &str = "0x2222222222222222222222222222222222222222";
const BACKER: &str = "0x3333333333333333333333333333333333333333";

fn global(p: &Projector<MemoryStore>) -> GlobalStats {
    p.store().require::<GlobalStats>(GLOBAL_STATS_KEY).unwrap()
}

fn user_task(p: &Projector<MemoryStore>, user: &str, task: &str) -> UserTask {
    p.store()
        .require::<UserTask>(&format!("{}-{}", user, task))
        .unwrap()
}

#[test]
fn test_task_added() {
    let p = projector();
    apply_all(&p, &[task_added(0x10, INITIATOR, RECIPIENT, 500)]);

    let task = p.store().require::<Task>("0x10").unwrap();
    assert_eq!(task.amount, Amount::new(500));
    assert_eq!(task.entrance_amount, Amount::new(500));
    assert_eq!(task.recipient, addr(RECIPIENT));
    assert_eq!(task.participants, 0);

    let row = user_task(&p, INITIATOR, "0x10");
    assert_eq!(row.user_stake, Amount::new(500));
    assert_eq!(row.task, "0x10");

    assert_eq!(
        p.store()
            .require::<UserAchievements>(INITIATOR)
            .unwrap()
            .tasks_created,
        1
    );

    let stats = global(&p);
    assert_eq!(stats.task_count, 1);
    assert_eq!(stats.users, 1);
}

#[test]
fn test_task_joined() {
    let p = projector();
    apply_all(
        &p,
        &[
            task_added(1, INITIATOR, RECIPIENT, 500),
            task_joined(1, BACKER, 200),
        ],
    );

    let task = p.store().require::<Task>("0x1").unwrap();
    assert_eq!(task.participants, 1);
    assert_eq!(task.amount, Amount::new(700));
    // entrance amount is a snapshot of the initial stake
    assert_eq!(task.entrance_amount, Amount::new(500));

    assert_eq!(user_task(&p, BACKER, "0x1").user_stake, Amount::new(200));

    let dash = p.store().require::<UserDashStats>(BACKER).unwrap();
    assert_eq!(dash.tribute, Amount::new(200));

    assert_eq!(
        p.store()
            .require::<UserAchievements>(BACKER)
            .unwrap()
            .tasks_joined,
        1
    );
    assert_eq!(global(&p).users, 2);
}

#[test]
fn test_votes_hit_exactly_one_tally() {
    let p = projector();
    apply_all(
        &p,
        &[
            task_added(1, INITIATOR, RECIPIENT, 500),
            task_joined(1, BACKER, 200),
            voted(1, BACKER, true, false),
        ],
    );

    let task = p.store().require::<Task>("0x1").unwrap();
    assert_eq!((task.positive_votes, task.negative_votes), (1, 0));
    assert!(!task.finished);

    apply_all(&p, &[voted(1, INITIATOR, false, true)]);

    let task = p.store().require::<Task>("0x1").unwrap();
    assert_eq!((task.positive_votes, task.negative_votes), (1, 1));
    assert!(task.finished);

    let backer_row = user_task(&p, BACKER, "0x1");
    assert!(backer_row.voted);
    assert!(backer_row.vote);

    let initiator_row = user_task(&p, INITIATOR, "0x1");
    assert!(initiator_row.voted);
    assert!(!initiator_row.vote);

    let fav = p.store().require::<UserFavStats>(BACKER).unwrap();
    assert_eq!((fav.positive_votes, fav.negative_votes), (1, 0));

    let fav = p.store().require::<UserFavStats>(INITIATOR).unwrap();
    assert_eq!((fav.positive_votes, fav.negative_votes), (0, 1));

    assert_eq!(
        p.store()
            .require::<UserAchievements>(BACKER)
            .unwrap()
            .tasks_voted,
        1
    );
}

#[test]
fn test_vote_without_participation_is_fatal() {
    let p = projector();
    apply_all(&p, &[task_added(1, INITIATOR, RECIPIENT, 500)]);

    let err = p.apply(1, &voted(1, BACKER, true, false)).unwrap_err();
    assert!(err.is_missing_entity());

    // the task tally was not committed either
    let task = p.store().require::<Task>("0x1").unwrap();
    assert_eq!(task.positive_votes, 0);
    assert_eq!(p.cursor().unwrap(), Some(0));
}

#[test]
fn test_user_redeemed_refunds_tribute() {
    let p = projector();
    apply_all(
        &p,
        &[
            task_added(1, INITIATOR, RECIPIENT, 500),
            task_joined(1, BACKER, 200),
            user_redeemed(1, BACKER, 200),
        ],
    );

    assert!(user_task(&p, BACKER, "0x1").user_stake.is_zero());
    let dash = p.store().require::<UserDashStats>(BACKER).unwrap();
    assert!(dash.tribute.is_zero());
}

#[test]
fn test_recipient_redeemed() {
    let p = projector();
    apply_all(
        &p,
        &[
            task_added(1, INITIATOR, RECIPIENT, 500),
            task_joined(1, RECIPIENT, 0),
            task_joined(1, BACKER, 200),
            voted(1, BACKER, true, true),
            recipient_redeemed(1, RECIPIENT, 700),
            task_proved(1, "https://proof.example/1"),
        ],
    );

    let task = p.store().require::<Task>("0x1").unwrap();
    assert!(task.executed);
    assert!(task.finished);
    assert_eq!(task.proof_link.as_deref(), Some("https://proof.example/1"));

    assert!(user_task(&p, RECIPIENT, "0x1").user_stake.is_zero());

    let dash = p.store().require::<UserDashStats>(RECIPIENT).unwrap();
    assert_eq!(dash.profit, Amount::new(700));

    let stats = global(&p);
    assert_eq!(stats.task_profits, Amount::new(700));
    assert_eq!(stats.task_count, 1);
    assert_eq!(stats.users, 3);
}

#[test]
fn test_recipient_without_row_is_fatal() {
    let p = projector();
    apply_all(&p, &[task_added(1, INITIATOR, RECIPIENT, 500)]);

    let err = p
        .apply(1, &recipient_redeemed(1, RECIPIENT, 500))
        .unwrap_err();
    assert!(err.is_missing_entity());

    let task = p.store().require::<Task>("0x1").unwrap();
    assert!(!task.executed);
    assert!(global(&p).task_profits.is_zero());
}
