use serde_derive::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
    pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub full_name: String,
    /// GitHub sends `null` for repositories without a description.
    pub description: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub open_issues_count: u64,
    pub owner: Owner,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: u64,
    pub title: String,
    pub html_url: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_ignores_unknown_fields() {
        let repository: Repository = serde_json::from_value(serde_json::json!({
            "id": 724712,
            "full_name": "rust-lang/rust",
            "description": null,
            "stargazers_count": 90000,
            "forks_count": 12000,
            "open_issues_count": 9000,
            "private": false,
            "owner": {
                "login": "rust-lang",
                "avatar_url": "https://avatars.githubusercontent.com/u/5430905?v=4",
                "type": "Organization"
            }
        }))
        .unwrap();

        assert_eq!(repository.full_name, "rust-lang/rust");
        assert_eq!(repository.description, None);
        assert_eq!(repository.owner.login, "rust-lang");
    }

    #[test]
    fn issue_requires_reporter() {
        let result = serde_json::from_value::<Issue>(serde_json::json!({
            "id": 1,
            "title": "t1",
            "html_url": "h1"
        }));
        assert!(result.is_err());
    }
}
