diesel::table! {
    drinks (id) {
        id -> Int4,
        title -> Text,
        recipe -> Text,
    }
}
