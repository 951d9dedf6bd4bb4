use crate::identity::Identity;


fn ada() -> Identity {
    Identity {
        uid: "uid-ada".to_string(),
        display_name: "ada".to_string(),
    }
}

fn bob() -> Identity {
    Identity {
        uid: "uid-bob".to_string(),
        display_name: "bob".to_string(),
    }
}
