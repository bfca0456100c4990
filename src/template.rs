pub const TEMPLATE: &str = r#"# GitHub Explorer

[< {{back.label}}]({{back.href}})

{{#if repository}}
## ![{{repository.owner.login}}]({{repository.owner.avatar_url}}) {{repository.full_name}}

{{repository.description}}

| Stars | Forks | Open issues |
|------:|------:|------------:|
| **{{repository.stargazers_count}}** | **{{repository.forks_count}}** | **{{repository.open_issues_count}}** |
{{else}}
{{> loader}}
{{/if}}

### Issues
{{#if issues}}
{{#each issues.items}}
- [**{{link_text title}}**]({{html_url}}) by {{user.login}} >
{{else}}
No open issues.
{{/each}}
{{else}}
{{> loader}}
{{/if}}
"#;

pub const LOADER: &str = "> `{{loader.kind}}` loading... ({{loader.width}}x{{loader.height}}, {{loader.color}})";
