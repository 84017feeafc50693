// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use super::*;

fn pool(n: usize) -> Vec<Address> {
    (0..n).map(|i| Address::from_label(&format!("p{}", i))).collect()
}

fn ready_draw(k: u32, n: usize) -> Draw {
    let mut d = Draw::new(Some(k));
    d.check_request(n, true).unwrap();
    d.record_request(RequestId(1));
    assert_eq!(d.fulfill(RequestId(1), &[RandomWord::from(42)]), Ok(Some(RandomWord::from(42))));
    d
}

#[test]
fn walks_all_states() {
    let participants = pool(5);
    let mut d = Draw::default();
    assert_eq!(d.state(), DrawState::Idle);

    d.set_num_winners(3).unwrap();
    d.check_request(participants.len(), true).unwrap();
    d.record_request(RequestId(9));
    assert_eq!(d.state(), DrawState::RequestPending);
    assert_eq!(d.request_id(), RequestId(9));

    assert_eq!(d.fulfill(RequestId(9), &[RandomWord::from(7)]), Ok(Some(RandomWord::from(7))));
    assert_eq!(d.state(), DrawState::Ready);
    assert_eq!(d.random_word(), Some(RandomWord::from(7)));

    let winners = d.select(&participants).unwrap().to_vec();
    assert_eq!(winners.len(), 3);
    assert_eq!(d.state(), DrawState::Finalized);
    assert_eq!(d.winners(), &winners[..]);
}

#[test]
fn zero_winners_rejected() {
    let mut d = Draw::default();
    assert!(matches!(d.set_num_winners(0), Err(RaffleError::InvalidInput(_))));
    assert_eq!(d.num_winners(), None);
}

#[test]
fn winner_count_fixed_after_request() {
    let mut d = Draw::new(Some(1));
    d.check_request(2, true).unwrap();
    d.record_request(RequestId(1));
    assert_eq!(
        d.set_num_winners(2),
        Err(RaffleError::InvalidState(DrawState::RequestPending))
    );
    assert_eq!(d.num_winners(), Some(1));
}

#[test]
fn request_needs_winner_count_and_pool() {
    let d = Draw::default();
    assert_eq!(
        d.check_request(10, true),
        Err(RaffleError::InsufficientParticipants {
            required: 0,
            available: 10
        })
    );

    let d = Draw::new(Some(3));
    assert_eq!(
        d.check_request(2, true),
        Err(RaffleError::InsufficientParticipants {
            required: 3,
            available: 2
        })
    );
    assert_eq!(d.check_request(3, true), Ok(()));
}

#[test]
fn rerequest_policy() {
    let mut d = Draw::new(Some(1));
    d.check_request(1, true).unwrap();
    d.record_request(RequestId(1));

    assert_eq!(d.check_request(1, true), Ok(()));
    assert_eq!(
        d.check_request(1, false),
        Err(RaffleError::InvalidState(DrawState::RequestPending))
    );

    d.record_request(RequestId(2));
    // answer to the superseded request is dropped
    assert_eq!(d.fulfill(RequestId(1), &[RandomWord::from(1)]), Ok(None));
    assert_eq!(d.state(), DrawState::RequestPending);
    assert_eq!(d.fulfill(RequestId(2), &[RandomWord::from(2)]), Ok(Some(RandomWord::from(2))));
    assert_eq!(d.random_word(), Some(RandomWord::from(2)));
}

#[test]
fn no_reroll_once_word_known() {
    let d = ready_draw(1, 3);
    assert_eq!(
        d.check_request(3, true),
        Err(RaffleError::InvalidState(DrawState::Ready))
    );
}

#[test]
fn fulfillment_outside_pending_is_ignored() {
    let mut d = Draw::new(Some(1));
    assert_eq!(d.fulfill(RequestId(0), &[RandomWord::from(1)]), Ok(None));
    assert_eq!(d.state(), DrawState::Idle);

    let mut d = ready_draw(1, 3);
    assert_eq!(d.fulfill(RequestId(1), &[RandomWord::from(99)]), Ok(None));
    assert_eq!(d.random_word(), Some(RandomWord::from(42)));
}

#[test]
fn empty_fulfillment_rejected() {
    let mut d = Draw::new(Some(1));
    d.check_request(1, true).unwrap();
    d.record_request(RequestId(4));
    assert!(matches!(
        d.fulfill(RequestId(4), &[]),
        Err(RaffleError::InvalidInput(_))
    ));
    assert_eq!(d.state(), DrawState::RequestPending);
}

#[test]
fn select_without_word() {
    let participants = pool(2);
    let mut d = Draw::new(Some(1));
    assert_eq!(d.select(&participants), Err(RaffleError::RandomNumberMissing));

    d.check_request(2, true).unwrap();
    d.record_request(RequestId(3));
    assert_eq!(d.select(&participants), Err(RaffleError::RandomNumberMissing));
    assert!(d.winners().is_empty());
}

#[test]
fn select_revalidates_pool() {
    let mut d = ready_draw(3, 3);
    assert_eq!(
        d.select(&pool(2)),
        Err(RaffleError::InsufficientParticipants {
            required: 3,
            available: 2
        })
    );
    assert_eq!(d.state(), DrawState::Ready);
}

#[test]
fn select_twice() {
    let participants = pool(4);
    let mut d = ready_draw(2, 4);
    let first = d.select(&participants).unwrap().to_vec();

    assert_eq!(d.select(&participants), Err(RaffleError::WinnersAlreadySelected));
    assert_eq!(d.winners(), &first[..]);
}

#[test]
fn reset_starts_new_cycle() {
    let participants = pool(4);
    let mut d = ready_draw(2, 4);
    assert_eq!(d.reset(), Err(RaffleError::InvalidState(DrawState::Ready)));

    d.select(&participants).unwrap();
    d.reset().unwrap();

    assert_eq!(d.state(), DrawState::Idle);
    assert_eq!(d.cycle(), 1);
    assert_eq!(d.num_winners(), Some(2));
    assert!(d.request_id().is_zero());
    assert_eq!(d.random_word(), None);
    assert!(d.winners().is_empty());
}
