diesel::table! {
    cameras (cam_id) {
        cam_id -> Text,
        status -> Text,             // active | inactive
    }
}

diesel::table! {
    modules (module_id) {
        module_id -> Text,
        cam_id -> Text,             // camera paired with this feeder
        status -> Text,             // active | inactive
        weight -> Nullable<Double>, // grams, unset until first telemetry
    }
}

diesel::table! {
    schedules (schedule_id) {
        schedule_id -> Integer,
        module_id -> Text,
        feed_time -> Text,          // zero-padded 24h HH:MM
        amount -> Double,
        status -> Text,             // pending | done
    }
}

diesel::table! {
    history (history_id) {
        history_id -> Integer,
        schedule_id -> Nullable<Integer>,
        created_at -> Timestamp,
    }
}

diesel::allow_tables_to_appear_in_same_query!(cameras, modules, schedules, history);
