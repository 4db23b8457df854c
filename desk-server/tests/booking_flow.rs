//! End-to-end booking lifecycle tests against an in-memory database.
//!
//! Covers the availability contract, the full confirm → check-in →
//! check-out flow (including the generated sale record), and the
//! per-booking serialization of concurrent transitions.

use chrono::NaiveDate;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};

use desk_server::bookings::money::stay_total;
use desk_server::bookings::transition::{PaymentFields, TransitionRequest};
use desk_server::bookings::{BookingStatus, PaymentMethod};
use desk_server::core::{Config, ServerState};
use desk_server::db::models::{Booking, BookingCreate, GuestCreate, RoomCreate, RoomType};
use desk_server::db::repository::{
    BookingRepository, GuestRepository, RoomRepository, SaleRepository,
};

async fn test_db() -> Surreal<Db> {
    let db = Surreal::new::<Mem>(()).await.expect("failed to open mem db");
    db.use_ns("hotel")
        .use_db("frontdesk")
        .await
        .expect("failed to select namespace");
    db
}

async fn test_state() -> ServerState {
    ServerState::with_db(Config::with_overrides("/tmp/desk-server-test", 0), test_db().await)
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

async fn seed_room(state: &ServerState, number: &str, price: f64) -> String {
    let room = RoomRepository::new(state.get_db())
        .create(RoomCreate {
            room_number: number.to_string(),
            room_type: RoomType::Double,
            price_per_night: price,
            amenities: vec!["wifi".to_string()],
            max_occupancy: 3,
            description: String::new(),
        })
        .await
        .expect("failed to create room");
    room.id.unwrap().to_string()
}

async fn seed_guest(state: &ServerState, name: &str) -> String {
    let guest = GuestRepository::new(state.get_db())
        .create(GuestCreate {
            name: name.to_string(),
            email: format!("{name}@example.com"),
            phone: String::new(),
            address: String::new(),
            id_proof: String::new(),
        })
        .await
        .expect("failed to create guest");
    guest.id.unwrap().to_string()
}

async fn seed_booking(
    state: &ServerState,
    room_id: &str,
    guest_id: &str,
    check_in: NaiveDate,
    check_out: NaiveDate,
    price: f64,
    advance: f64,
) -> Booking {
    let nights = (check_out - check_in).num_days();
    BookingRepository::new(state.get_db())
        .create(
            BookingCreate {
                room: room_id.parse().unwrap(),
                guest: guest_id.parse().unwrap(),
                check_in,
                check_out,
                guests_count: 2,
                special_requests: String::new(),
                advance_payment: advance,
            },
            stay_total(nights, price),
        )
        .await
        .expect("failed to create booking")
}

#[tokio::test]
async fn availability_excludes_overlap_and_keeps_adjacent() {
    let state = test_state().await;
    let busy = seed_room(&state, "101", 100.0).await;
    let back_to_back = seed_room(&state, "102", 100.0).await;
    let free = seed_room(&state, "103", 100.0).await;
    let guest = seed_guest(&state, "alice").await;

    // 101 has a confirmed stay overlapping the queried window
    seed_booking(&state, &busy, &guest, d(2024, 5, 11), d(2024, 5, 13), 100.0, 0.0).await;
    // 102's stay ends the day the query starts (adjacent, non-overlapping)
    seed_booking(&state, &back_to_back, &guest, d(2024, 5, 8), d(2024, 5, 10), 100.0, 0.0).await;

    let occupied = BookingRepository::new(state.get_db())
        .occupied_room_ids(d(2024, 5, 10), d(2024, 5, 12))
        .await
        .unwrap();
    let occupied: Vec<String> = occupied.into_iter().map(|id| id.to_string()).collect();

    assert!(occupied.contains(&busy));
    assert!(!occupied.contains(&back_to_back));
    assert!(!occupied.contains(&free));
}

#[tokio::test]
async fn cancelled_bookings_do_not_block_availability() {
    let state = test_state().await;
    let room = seed_room(&state, "201", 80.0).await;
    let guest = seed_guest(&state, "bob").await;

    let booking =
        seed_booking(&state, &room, &guest, d(2024, 6, 1), d(2024, 6, 5), 80.0, 0.0).await;
    let booking_id = booking.id.unwrap().to_string();

    state
        .transitions
        .apply(
            &booking_id,
            TransitionRequest {
                status: BookingStatus::Cancelled,
                payment: PaymentFields::default(),
            },
            d(2024, 5, 20),
        )
        .await
        .unwrap();

    let occupied = BookingRepository::new(state.get_db())
        .occupied_room_ids(d(2024, 6, 1), d(2024, 6, 5))
        .await
        .unwrap();
    assert!(occupied.is_empty());
}

#[tokio::test]
async fn full_lifecycle_check_in_then_check_out() {
    let state = test_state().await;
    let room = seed_room(&state, "301", 100.0).await;
    let guest = seed_guest(&state, "carol").await;

    // Two nights at 100 → total 200, with 80 paid up front
    let booking =
        seed_booking(&state, &room, &guest, d(2024, 5, 10), d(2024, 5, 12), 100.0, 80.0).await;
    let booking_id = booking.id.unwrap().to_string();
    assert_eq!(booking.status, BookingStatus::Confirmed);
    assert_eq!(booking.total_amount, 200.0);

    // Check in without extra advance: advance unchanged
    let response = state
        .transitions
        .apply(
            &booking_id,
            TransitionRequest {
                status: BookingStatus::CheckedIn,
                payment: PaymentFields::default(),
            },
            d(2024, 5, 10),
        )
        .await
        .unwrap();
    assert_eq!(response.booking.status, BookingStatus::CheckedIn);
    assert_eq!(response.booking.advance_payment, 80.0);
    assert!(response.balance_due.is_none());

    // Check out with 50 extra charges → balance 200 + 50 - 80 = 170
    let response = state
        .transitions
        .apply(
            &booking_id,
            TransitionRequest {
                status: BookingStatus::CheckedOut,
                payment: PaymentFields {
                    additional_charges: Some(50.0),
                    payment_method: Some(PaymentMethod::Card),
                    ..Default::default()
                },
            },
            d(2024, 5, 12),
        )
        .await
        .unwrap();
    assert_eq!(response.booking.status, BookingStatus::CheckedOut);
    assert_eq!(response.balance_due, Some(170.0));
    assert_eq!(response.booking.balance_due, Some(170.0));

    // The check-out generated exactly one sale for the total owed
    let sales = SaleRepository::new(state.get_db()).find_all().await.unwrap();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].amount, 250.0);
    assert_eq!(sales[0].payment_method, PaymentMethod::Card);
    assert_eq!(sales[0].booking.to_string(), booking_id);
    assert_eq!(sales[0].date, d(2024, 5, 12));
}

#[tokio::test]
async fn check_in_advance_accumulates_in_store() {
    let state = test_state().await;
    let room = seed_room(&state, "401", 100.0).await;
    let guest = seed_guest(&state, "dave").await;

    let booking =
        seed_booking(&state, &room, &guest, d(2024, 7, 1), d(2024, 7, 3), 100.0, 20.0).await;
    let booking_id = booking.id.unwrap().to_string();

    let response = state
        .transitions
        .apply(
            &booking_id,
            TransitionRequest {
                status: BookingStatus::CheckedIn,
                payment: PaymentFields {
                    advance_payment_received: Some(30.0),
                    ..Default::default()
                },
            },
            d(2024, 7, 1),
        )
        .await
        .unwrap();
    assert_eq!(response.booking.advance_payment, 50.0);

    // The persisted record agrees with the response
    let stored = BookingRepository::new(state.get_db())
        .find_by_id(&booking_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.advance_payment, 50.0);
}

#[tokio::test]
async fn replayed_check_out_is_rejected_and_does_not_double_charge() {
    let state = test_state().await;
    let room = seed_room(&state, "501", 100.0).await;
    let guest = seed_guest(&state, "erin").await;

    let booking =
        seed_booking(&state, &room, &guest, d(2024, 5, 10), d(2024, 5, 12), 100.0, 0.0).await;
    let booking_id = booking.id.unwrap().to_string();

    let check_in = TransitionRequest {
        status: BookingStatus::CheckedIn,
        payment: PaymentFields::default(),
    };
    state
        .transitions
        .apply(&booking_id, check_in, d(2024, 5, 10))
        .await
        .unwrap();

    let check_out = || TransitionRequest {
        status: BookingStatus::CheckedOut,
        payment: PaymentFields {
            additional_charges: Some(25.0),
            ..Default::default()
        },
    };

    state
        .transitions
        .apply(&booking_id, check_out(), d(2024, 5, 12))
        .await
        .unwrap();

    // Replay: rejected outright, no second sale, no recomputation
    let err = state
        .transitions
        .apply(&booking_id, check_out(), d(2024, 5, 12))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("checked_out"));

    let sales = SaleRepository::new(state.get_db()).find_all().await.unwrap();
    assert_eq!(sales.len(), 1);
}

#[tokio::test]
async fn negative_charges_leave_booking_untouched() {
    let state = test_state().await;
    let room = seed_room(&state, "601", 100.0).await;
    let guest = seed_guest(&state, "frank").await;

    let booking =
        seed_booking(&state, &room, &guest, d(2024, 5, 10), d(2024, 5, 12), 100.0, 40.0).await;
    let booking_id = booking.id.unwrap().to_string();

    state
        .transitions
        .apply(
            &booking_id,
            TransitionRequest {
                status: BookingStatus::CheckedIn,
                payment: PaymentFields::default(),
            },
            d(2024, 5, 10),
        )
        .await
        .unwrap();

    let err = state
        .transitions
        .apply(
            &booking_id,
            TransitionRequest {
                status: BookingStatus::CheckedOut,
                payment: PaymentFields {
                    additional_charges: Some(-10.0),
                    ..Default::default()
                },
            },
            d(2024, 5, 12),
        )
        .await
        .unwrap_err();
    assert!(err.to_string().contains("additional_charges"));

    // Rejected before any mutation: still checked in, no sale, no balance
    let stored = BookingRepository::new(state.get_db())
        .find_by_id(&booking_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, BookingStatus::CheckedIn);
    assert_eq!(stored.advance_payment, 40.0);
    assert!(stored.balance_due.is_none());

    let sales = SaleRepository::new(state.get_db()).find_all().await.unwrap();
    assert!(sales.is_empty());
}

#[tokio::test]
async fn concurrent_check_outs_are_serialized() {
    let state = test_state().await;
    let room = seed_room(&state, "701", 100.0).await;
    let guest = seed_guest(&state, "grace").await;

    let booking =
        seed_booking(&state, &room, &guest, d(2024, 5, 10), d(2024, 5, 12), 100.0, 50.0).await;
    let booking_id = booking.id.unwrap().to_string();

    state
        .transitions
        .apply(
            &booking_id,
            TransitionRequest {
                status: BookingStatus::CheckedIn,
                payment: PaymentFields::default(),
            },
            d(2024, 5, 10),
        )
        .await
        .unwrap();

    // Two operators hit check-out at the same time: exactly one wins,
    // the loser sees a terminal-state rejection, only one sale exists.
    let make_request = || TransitionRequest {
        status: BookingStatus::CheckedOut,
        payment: PaymentFields {
            additional_charges: Some(10.0),
            ..Default::default()
        },
    };

    let t1 = {
        let transitions = state.transitions.clone();
        let id = booking_id.clone();
        let req = make_request();
        tokio::spawn(async move { transitions.apply(&id, req, d(2024, 5, 12)).await })
    };
    let t2 = {
        let transitions = state.transitions.clone();
        let id = booking_id.clone();
        let req = make_request();
        tokio::spawn(async move { transitions.apply(&id, req, d(2024, 5, 12)).await })
    };

    let results = [t1.await.unwrap(), t2.await.unwrap()];
    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);

    let sales = SaleRepository::new(state.get_db()).find_all().await.unwrap();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].amount, 210.0);
}

#[tokio::test]
async fn overpayment_reports_negative_balance() {
    let state = test_state().await;
    let room = seed_room(&state, "801", 50.0).await;
    let guest = seed_guest(&state, "heidi").await;

    // One night at 50 with 80 collected up front
    let booking =
        seed_booking(&state, &room, &guest, d(2024, 5, 10), d(2024, 5, 11), 50.0, 80.0).await;
    let booking_id = booking.id.unwrap().to_string();

    state
        .transitions
        .apply(
            &booking_id,
            TransitionRequest {
                status: BookingStatus::CheckedIn,
                payment: PaymentFields::default(),
            },
            d(2024, 5, 10),
        )
        .await
        .unwrap();

    let response = state
        .transitions
        .apply(
            &booking_id,
            TransitionRequest {
                status: BookingStatus::CheckedOut,
                payment: PaymentFields::default(),
            },
            d(2024, 5, 11),
        )
        .await
        .unwrap();

    // Refund owed to the guest — sign is preserved, not clamped
    assert_eq!(response.balance_due, Some(-30.0));
}

#[tokio::test]
async fn booking_list_joins_room_and_guest_details() {
    let state = test_state().await;
    let room = seed_room(&state, "901", 120.0).await;
    let guest = seed_guest(&state, "ivan").await;

    seed_booking(&state, &room, &guest, d(2024, 8, 1), d(2024, 8, 4), 120.0, 0.0).await;

    let details = BookingRepository::new(state.get_db())
        .find_all_with_details()
        .await
        .unwrap();

    assert_eq!(details.len(), 1);
    assert_eq!(details[0].room_number, "901");
    assert_eq!(details[0].room_type, "double");
    assert_eq!(details[0].guest_name, "ivan");
    assert_eq!(details[0].guest_email, "ivan@example.com");
    assert_eq!(details[0].total_amount, 360.0);
}
