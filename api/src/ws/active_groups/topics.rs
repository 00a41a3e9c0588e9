pub fn active_group_topic(active_group_id: i64) -> String {
    format!("active_group:{active_group_id}")
}
