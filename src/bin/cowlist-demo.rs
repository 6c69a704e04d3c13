use cowlist::prelude::*;

fn main() {
    cowlist::tracing::init();

    let list = CowList::builder().name("demo").build();
    for value in ["3", "2", "1", "3"] {
        list.insert_in_order(value.to_string());
    }

    tracing::info!(version = list.version(), "inserted {} values", list.len());
    println!("{list}");
}
