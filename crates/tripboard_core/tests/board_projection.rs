use tripboard_core::{
    filter_board_items, group_into_columns, project, project_board_items, Assignment,
    EquipmentItem, ItemStatus, SlotId, Traveler, TripId, ViewFilter, ViewOwner,
};
use uuid::Uuid;

fn trip() -> TripId {
    Uuid::parse_str("aaaaaaaa-0000-4000-8000-000000000001").unwrap()
}

fn item(name: &str, assignment: Assignment) -> EquipmentItem {
    EquipmentItem::new(trip(), name, assignment)
}

fn mixed_rows() -> Vec<EquipmentItem> {
    let mut stove = item("stove", Assignment::Shared);
    stove.general_status = Some(ItemStatus::Packed);
    let mut sleeping_bag = item("sleeping bag", Assignment::BothIndividual);
    sleeping_bag.jonne_status = Some(ItemStatus::ToBuy);
    let knife = item("knife", Assignment::Jonne);
    let mut camera = item("camera", Assignment::Frank);
    camera.general_status = Some(ItemStatus::Optional);
    vec![stove, sleeping_bag, knife, camera]
}

#[test]
fn both_individual_row_fans_out_with_independent_statuses() {
    let mut row = item("headlamp", Assignment::BothIndividual);
    row.frank_status = Some(ItemStatus::Packed);

    let board = project_board_items(std::slice::from_ref(&row));

    assert_eq!(board.len(), 2);
    assert_eq!(board[0].view_owner, ViewOwner::Jonne);
    assert_eq!(board[0].current_status, ItemStatus::Backlog);
    assert_eq!(board[0].slot_id, SlotId::for_traveler(row.id, Traveler::Jonne));
    assert_eq!(board[1].view_owner, ViewOwner::Frank);
    assert_eq!(board[1].current_status, ItemStatus::Packed);
    assert_eq!(board[1].slot_id, SlotId::for_traveler(row.id, Traveler::Frank));
    assert_eq!(board[0].item.id, board[1].item.id);
    assert_ne!(board[0].slot_id, board[1].slot_id);
}

#[test]
fn shared_row_projects_to_one_shared_slot() {
    let mut row = item("tent", Assignment::Shared);
    row.general_status = Some(ItemStatus::Optional);

    let board = project_board_items(std::slice::from_ref(&row));

    assert_eq!(board.len(), 1);
    assert_eq!(board[0].view_owner, ViewOwner::Shared);
    assert_eq!(board[0].current_status, ItemStatus::Optional);
    assert_eq!(board[0].slot_id, SlotId::single(row.id));
}

#[test]
fn single_owner_rows_use_general_status_and_owner_tag() {
    let mut row = item("passport", Assignment::Frank);
    row.general_status = Some(ItemStatus::ReadyToPack);
    row.frank_status = Some(ItemStatus::NotNeeded);

    let board = project_board_items(std::slice::from_ref(&row));

    assert_eq!(board.len(), 1);
    assert_eq!(board[0].view_owner, ViewOwner::Frank);
    assert_eq!(board[0].current_status, ItemStatus::ReadyToPack);
}

#[test]
fn projection_count_and_order_follow_source_rows() {
    let rows = mixed_rows();
    let board = project_board_items(&rows);

    let expected = rows
        .iter()
        .map(|row| if row.assignment == Assignment::BothIndividual { 2 } else { 1 })
        .sum::<usize>();
    assert_eq!(board.len(), expected);

    let names = board
        .iter()
        .map(|slot| slot.item.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        vec!["stove", "sleeping bag", "sleeping bag", "knife", "camera"]
    );
    assert!(board
        .iter()
        .all(|slot| ItemStatus::ALL.contains(&slot.current_status)));
}

#[test]
fn projection_of_empty_snapshot_is_empty() {
    assert!(project_board_items(&[]).is_empty());
}

#[test]
fn mine_filter_keeps_own_and_shared_slots() {
    let board = project_board_items(&mixed_rows());

    let mine = filter_board_items(board, ViewFilter::Mine, Some(Traveler::Jonne));

    let owners = mine.iter().map(|slot| slot.view_owner).collect::<Vec<_>>();
    assert_eq!(
        owners,
        vec![ViewOwner::Shared, ViewOwner::Jonne, ViewOwner::Jonne]
    );
}

#[test]
fn mine_filter_without_current_user_shows_everything() {
    let board = project_board_items(&mixed_rows());
    let total = board.len();

    let mine = filter_board_items(board, ViewFilter::Mine, None);

    assert_eq!(mine.len(), total);
}

#[test]
fn shared_filter_ignores_current_user() {
    let board = project_board_items(&mixed_rows());

    let shared = filter_board_items(board, ViewFilter::Shared, Some(Traveler::Frank));

    assert_eq!(shared.len(), 1);
    assert_eq!(shared[0].item.name, "stove");
}

#[test]
fn grouping_always_yields_six_ordered_columns() {
    let columns = group_into_columns(Vec::new());

    let statuses = columns.iter().map(|column| column.status).collect::<Vec<_>>();
    assert_eq!(statuses, ItemStatus::ALL.to_vec());
    assert_eq!(columns.total(), 0);
    assert!(columns.iter().all(|column| column.count() == 0));
    assert_eq!(columns.column(ItemStatus::ToBuy).title, "Noch besorgen");
}

#[test]
fn grouping_partitions_every_visible_slot_once() {
    let rows = mixed_rows();
    let columns = project(&rows, ViewFilter::All, None);

    assert_eq!(columns.total(), 5);
    assert_eq!(
        columns.counts(),
        vec![
            (ItemStatus::Backlog, 2),
            (ItemStatus::ToBuy, 1),
            (ItemStatus::ReadyToPack, 0),
            (ItemStatus::Packed, 1),
            (ItemStatus::Optional, 1),
            (ItemStatus::NotNeeded, 0),
        ]
    );
    for column in columns.iter() {
        assert!(column
            .items
            .iter()
            .all(|slot| slot.current_status == column.status));
    }

    let backlog = columns.column(ItemStatus::Backlog);
    assert_eq!(backlog.items[0].view_owner, ViewOwner::Frank);
    assert_eq!(backlog.items[1].item.name, "knife");
}

#[test]
fn board_item_serializes_slot_id_as_string() {
    let row = item("map", Assignment::BothIndividual);
    let board = project_board_items(std::slice::from_ref(&row));

    let json = serde_json::to_value(&board[1]).unwrap();
    assert_eq!(json["slot_id"], format!("{}-frank", row.id));
    assert_eq!(json["view_owner"], "frank");
    assert_eq!(json["current_status"], "backlog");
    assert_eq!(json["item"]["assignment"], "both_individual");
}
