//! Diesel table definitions matching `migrations/`.

diesel::table! {
    stations (name) {
        name -> Text,
        distance -> BigInt,
    }
}

diesel::table! {
    tickets (id) {
        id -> BigInt,
        name -> Text,
        age -> BigInt,
        start_station -> Text,
        end_station -> Text,
        fare -> BigInt,
        issued_at -> Timestamp,
        artifact_id -> Text,
        used -> Bool,
    }
}

diesel::table! {
    admins (username) {
        username -> Text,
        password_hash -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(stations, tickets);
