/// 사용자 저장
pub const INSERT_USER: &str = r#"
    INSERT INTO users (id, username, email, password_hash, created_at)
    VALUES ($1, $2, $3, $4, $5)
"#;

/// 이메일로 사용자 조회
pub const GET_USER_BY_EMAIL: &str =
    "SELECT id, username, email, password_hash, created_at FROM users WHERE email = $1";

/// 사용자 중복 확인
pub const USER_EXISTS: &str =
    "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 OR email = $2) AS found";

/// 경매 상품 저장
pub const INSERT_ITEM: &str = r#"
    INSERT INTO auction_items
        (id, title, description, starting_bid, auction_end_time, highest_bid, highest_bidder, is_closed)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
"#;

/// 경매 상품 조회
pub const GET_ITEM: &str = r#"
    SELECT id, title, description, starting_bid, auction_end_time, highest_bid, highest_bidder, is_closed
    FROM auction_items
    WHERE id = $1
"#;

/// 모든 경매 상품 조회
pub const GET_ALL_ITEMS: &str = r#"
    SELECT id, title, description, starting_bid, auction_end_time, highest_bid, highest_bidder, is_closed
    FROM auction_items
    ORDER BY created_at ASC
"#;

/// 경매 상품 정보 수정
pub const UPDATE_ITEM_DETAILS: &str = r#"
    UPDATE auction_items
    SET title = $2,
        description = $3,
        starting_bid = $4,
        auction_end_time = $5
    WHERE id = $1
"#;

/// 입찰 상태 갱신
pub const UPDATE_ITEM_BID: &str = r#"
    UPDATE auction_items
    SET highest_bid = $2,
        highest_bidder = $3,
        is_closed = $4
    WHERE id = $1
"#;

/// 경매 상품 삭제
pub const DELETE_ITEM: &str = "DELETE FROM auction_items WHERE id = $1";
