pub mod postgres_activity_repo;
pub mod postgres_board_member_repo;
pub mod postgres_board_repo;
pub mod postgres_card_repo;
pub mod postgres_list_repo;
pub mod postgres_user_repo;
pub mod postgres_workspace_member_repo;
pub mod postgres_workspace_repo;
pub mod sqlite_activity_repo;
pub mod sqlite_board_member_repo;
pub mod sqlite_board_repo;
pub mod sqlite_card_repo;
pub mod sqlite_list_repo;
pub mod sqlite_user_repo;
pub mod sqlite_workspace_member_repo;
pub mod sqlite_workspace_repo;
