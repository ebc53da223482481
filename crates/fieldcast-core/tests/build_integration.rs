//! End-to-end tests for the mapping-driven tree builder
//!
//! These tests drive the full pipeline with a company/branch/team/member
//! object graph: typed entities backed by per-type accessor tables, the
//! same graph expressed as JSON, and the XML printer on top.

use std::sync::LazyLock;

use fieldcast_core::{
    build, build_xml, loader, FieldTable, FieldValue, MappingRule, Resolvable, Result,
};
use serde_json::json;

// ---------------------------------------------------------------------------
// Entities: plain passive records, resolvable through accessor tables
// ---------------------------------------------------------------------------

struct Campaign {
    id: String,
    name: String,
    status: String,
}

static CAMPAIGN_FIELDS: LazyLock<FieldTable<Campaign>> = LazyLock::new(|| {
    FieldTable::new("Campaign")
        .field("id", |c: &Campaign| FieldValue::from(c.id.as_str()))
        .field("name", |c: &Campaign| FieldValue::from(c.name.as_str()))
        .field("status", |c: &Campaign| FieldValue::from(c.status.as_str()))
});

impl Resolvable for Campaign {
    fn type_name(&self) -> &str {
        CAMPAIGN_FIELDS.type_name()
    }
    fn field(&self, name: &str) -> Result<FieldValue<'_>> {
        CAMPAIGN_FIELDS.resolve(self, name)
    }
}

struct Task {
    id: String,
    name: String,
    status: String,
}

static TASK_FIELDS: LazyLock<FieldTable<Task>> = LazyLock::new(|| {
    FieldTable::new("Task")
        .field("id", |t: &Task| FieldValue::from(t.id.as_str()))
        .field("name", |t: &Task| FieldValue::from(t.name.as_str()))
        .field("status", |t: &Task| FieldValue::from(t.status.as_str()))
});

impl Resolvable for Task {
    fn type_name(&self) -> &str {
        TASK_FIELDS.type_name()
    }
    fn field(&self, name: &str) -> Result<FieldValue<'_>> {
        TASK_FIELDS.resolve(self, name)
    }
}

struct Member {
    id: String,
    name: String,
    role: String,
    technologies: Option<Vec<String>>,
    tasks: Option<Vec<Task>>,
    campaigns: Option<Vec<Campaign>>,
}

static MEMBER_FIELDS: LazyLock<FieldTable<Member>> = LazyLock::new(|| {
    FieldTable::new("Member")
        .field("id", |m: &Member| FieldValue::from(m.id.as_str()))
        .field("name", |m: &Member| FieldValue::from(m.name.as_str()))
        .field("role", |m: &Member| FieldValue::from(m.role.as_str()))
        .field("technologies", |m: &Member| {
            FieldValue::scalars(m.technologies.as_deref())
        })
        .field("tasks", |m: &Member| FieldValue::objects(m.tasks.as_deref()))
        .field("campaigns", |m: &Member| {
            FieldValue::objects(m.campaigns.as_deref())
        })
});

impl Resolvable for Member {
    fn type_name(&self) -> &str {
        MEMBER_FIELDS.type_name()
    }
    fn field(&self, name: &str) -> Result<FieldValue<'_>> {
        MEMBER_FIELDS.resolve(self, name)
    }
}

struct Team {
    name: String,
    members: Vec<Member>,
}

static TEAM_FIELDS: LazyLock<FieldTable<Team>> = LazyLock::new(|| {
    FieldTable::new("Team")
        .field("name", |t: &Team| FieldValue::from(t.name.as_str()))
        .field("members", |t: &Team| {
            FieldValue::objects(Some(t.members.as_slice()))
        })
});

impl Resolvable for Team {
    fn type_name(&self) -> &str {
        TEAM_FIELDS.type_name()
    }
    fn field(&self, name: &str) -> Result<FieldValue<'_>> {
        TEAM_FIELDS.resolve(self, name)
    }
}

struct Branch {
    branch_name: String,
    teams: Vec<Team>,
}

static BRANCH_FIELDS: LazyLock<FieldTable<Branch>> = LazyLock::new(|| {
    FieldTable::new("Branch")
        .field("branchName", |b: &Branch| {
            FieldValue::from(b.branch_name.as_str())
        })
        .field("teams", |b: &Branch| {
            FieldValue::objects(Some(b.teams.as_slice()))
        })
});

impl Resolvable for Branch {
    fn type_name(&self) -> &str {
        BRANCH_FIELDS.type_name()
    }
    fn field(&self, name: &str) -> Result<FieldValue<'_>> {
        BRANCH_FIELDS.resolve(self, name)
    }
}

struct Company {
    name: String,
    location: String,
    branches: Vec<Branch>,
}

static COMPANY_FIELDS: LazyLock<FieldTable<Company>> = LazyLock::new(|| {
    FieldTable::new("Company")
        .field("name", |c: &Company| FieldValue::from(c.name.as_str()))
        .field("location", |c: &Company| {
            FieldValue::from(c.location.as_str())
        })
        .field("branches", |c: &Company| {
            FieldValue::objects(Some(c.branches.as_slice()))
        })
});

impl Resolvable for Company {
    fn type_name(&self) -> &str {
        COMPANY_FIELDS.type_name()
    }
    fn field(&self, name: &str) -> Result<FieldValue<'_>> {
        COMPANY_FIELDS.resolve(self, name)
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn mapping_table() -> Vec<MappingRule> {
    let row = |group: &str, field: &str, st: &str, node: &str, tt: &str, path: &str| {
        json!({
            "group": group,
            "source_field": field,
            "source_type": st,
            "target_node": node,
            "target_type": tt,
            "path": path
        })
    };
    let rows = json!([
        row("Company", "name", "string", "name", "string", "company/name"),
        row("Company", "location", "string", "location", "string", "company/location"),
        row("Branch", "branches", "List<Branch>", "branches", "string", "company/branches"),
        row("Branch", "branchName", "string", "name", "string", "company/branches/branch/name"),
        row("Team", "teams", "List<Team>", "teams", "string", "company/branches/branch/teams"),
        row("Team", "name", "string", "name", "string", "company/branches/branch/teams/team/name"),
        row("Member", "members", "List<Member>", "members", "string",
            "company/branches/branch/teams/team/members"),
        row("Member", "id", "string", "id", "string",
            "company/branches/branch/teams/team/members/member/id"),
        row("Member", "name", "string", "name", "string",
            "company/branches/branch/teams/team/members/member/name"),
        row("Member", "role", "string", "role", "string",
            "company/branches/branch/teams/team/members/member/role"),
        row("Technology", "technologies", "List<string>", "technologies", "string",
            "company/branches/branch/teams/team/members/member/technologies"),
        row("Task", "tasks", "List<Task>", "tasks", "string",
            "company/branches/branch/teams/team/members/member/tasks"),
        row("Task", "id", "string", "id", "string",
            "company/branches/branch/teams/team/members/member/tasks/task/id"),
        row("Task", "name", "string", "name", "string",
            "company/branches/branch/teams/team/members/member/tasks/task/name"),
        row("Task", "status", "string", "status", "string",
            "company/branches/branch/teams/team/members/member/tasks/task/status"),
        row("Campaign", "campaigns", "List<Campaign>", "campaigns", "string",
            "company/branches/branch/teams/team/members/member/campaigns"),
        row("Campaign", "id", "string", "id", "string",
            "company/branches/branch/teams/team/members/member/campaigns/campaign/id"),
        row("Campaign", "name", "string", "name", "string",
            "company/branches/branch/teams/team/members/member/campaigns/campaign/name"),
        row("Campaign", "status", "string", "status", "string",
            "company/branches/branch/teams/team/members/member/campaigns/campaign/status"),
    ]);
    loader::load_mappings_from_value(rows).expect("fixture table should parse")
}

fn sample_company() -> Company {
    let task = |id: &str, name: &str, status: &str| Task {
        id: id.into(),
        name: name.into(),
        status: status.into(),
    };
    let campaign = |id: &str, name: &str, status: &str| Campaign {
        id: id.into(),
        name: name.into(),
        status: status.into(),
    };

    let member1 = Member {
        id: "S101".into(),
        name: "Michael Turner".into(),
        role: "Lead Developer".into(),
        technologies: Some(vec!["Java".into(), "Spring Boot".into(), "AWS".into()]),
        tasks: Some(vec![
            task("T001", "Develop API", "Completed"),
            task("T002", "Code Review", "In Progress"),
        ]),
        campaigns: None,
    };
    let member2 = Member {
        id: "S102".into(),
        name: "Emma Clark".into(),
        role: "Backend Developer".into(),
        technologies: Some(vec!["Node.js".into(), "Express".into(), "MongoDB".into()]),
        tasks: Some(vec![task("T003", "Database Setup", "Not Started")]),
        campaigns: None,
    };
    let member3 = Member {
        id: "M101".into(),
        name: "Lucas Scott".into(),
        role: "Marketing Manager".into(),
        technologies: None,
        tasks: None,
        campaigns: Some(vec![
            campaign("C001", "Winter Sale", "Ongoing"),
            campaign("C002", "Black Friday Promo", "Upcoming"),
        ]),
    };

    Company {
        name: "Global Enterprises".into(),
        location: "London".into(),
        branches: vec![
            Branch {
                branch_name: "North America".into(),
                teams: vec![Team {
                    name: "Software Development".into(),
                    members: vec![member1, member2],
                }],
            },
            Branch {
                branch_name: "Europe".into(),
                teams: vec![Team {
                    name: "Marketing".into(),
                    members: vec![member3],
                }],
            },
        ],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn test_full_company_graph_structure() {
    let rules = mapping_table();
    let company = sample_company();

    let doc = build(&rules, &company).expect("build should succeed");
    let root = doc.root();
    assert_eq!(root.name(), "company");
    assert_eq!(root.child("name").unwrap().text(), Some("Global Enterprises"));
    assert_eq!(root.child("location").unwrap().text(), Some("London"));

    let branches = root.child("branches").unwrap();
    let branch_names: Vec<_> = branches
        .children_named("branch")
        .map(|b| b.child("name").unwrap().text().unwrap())
        .collect();
    assert_eq!(branch_names, vec!["North America", "Europe"]);
}

#[test]
fn test_members_expand_in_source_order() {
    let doc = build(&mapping_table(), &sample_company()).unwrap();

    let branches: Vec<_> = doc
        .root()
        .child("branches")
        .unwrap()
        .children_named("branch")
        .collect();
    let dev_team = branches[0]
        .child("teams")
        .unwrap()
        .children_named("team")
        .next()
        .unwrap();
    assert_eq!(dev_team.child("name").unwrap().text(), Some("Software Development"));

    let members: Vec<_> = dev_team
        .child("members")
        .unwrap()
        .children_named("member")
        .collect();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0].child("id").unwrap().text(), Some("S101"));
    assert_eq!(members[1].child("id").unwrap().text(), Some("S102"));
}

#[test]
fn test_scalar_collection_expansion() {
    let doc = build(&mapping_table(), &sample_company()).unwrap();

    let first_member = doc
        .root()
        .child("branches")
        .unwrap()
        .children_named("branch")
        .next()
        .unwrap()
        .child("teams")
        .unwrap()
        .children_named("team")
        .next()
        .unwrap()
        .child("members")
        .unwrap()
        .children_named("member")
        .next()
        .unwrap();

    let techs: Vec<_> = first_member
        .child("technologies")
        .unwrap()
        .children_named("technology")
        .filter_map(|t| t.text())
        .collect();
    assert_eq!(techs, vec!["Java", "Spring Boot", "AWS"]);

    let task_ids: Vec<_> = first_member
        .child("tasks")
        .unwrap()
        .children_named("task")
        .map(|t| t.child("id").unwrap().text().unwrap())
        .collect();
    assert_eq!(task_ids, vec!["T001", "T002"]);
}

#[test]
fn test_absent_collections_leave_no_container() {
    let doc = build(&mapping_table(), &sample_company()).unwrap();

    let branches: Vec<_> = doc
        .root()
        .child("branches")
        .unwrap()
        .children_named("branch")
        .collect();

    // marketing manager has campaigns but neither technologies nor tasks
    let marketer = branches[1]
        .child("teams")
        .unwrap()
        .children_named("team")
        .next()
        .unwrap()
        .child("members")
        .unwrap()
        .children_named("member")
        .next()
        .unwrap();
    assert!(marketer.child("technologies").is_none());
    assert!(marketer.child("tasks").is_none());

    let campaign_names: Vec<_> = marketer
        .child("campaigns")
        .unwrap()
        .children_named("campaign")
        .map(|c| c.child("name").unwrap().text().unwrap())
        .collect();
    assert_eq!(campaign_names, vec!["Winter Sale", "Black Friday Promo"]);

    // developers have no campaigns container either
    let developer = branches[0]
        .child("teams")
        .unwrap()
        .children_named("team")
        .next()
        .unwrap()
        .child("members")
        .unwrap()
        .children_named("member")
        .next()
        .unwrap();
    assert!(developer.child("campaigns").is_none());
}

#[test]
fn test_typed_and_json_backends_agree() {
    let rules = mapping_table();
    let typed = build(&rules, &sample_company()).unwrap();

    let data = json!({
        "name": "Global Enterprises",
        "location": "London",
        "branches": [
            {
                "branchName": "North America",
                "teams": [{
                    "name": "Software Development",
                    "members": [
                        {
                            "id": "S101", "name": "Michael Turner", "role": "Lead Developer",
                            "technologies": ["Java", "Spring Boot", "AWS"],
                            "tasks": [
                                {"id": "T001", "name": "Develop API", "status": "Completed"},
                                {"id": "T002", "name": "Code Review", "status": "In Progress"}
                            ],
                            "campaigns": null
                        },
                        {
                            "id": "S102", "name": "Emma Clark", "role": "Backend Developer",
                            "technologies": ["Node.js", "Express", "MongoDB"],
                            "tasks": [
                                {"id": "T003", "name": "Database Setup", "status": "Not Started"}
                            ],
                            "campaigns": null
                        }
                    ]
                }]
            },
            {
                "branchName": "Europe",
                "teams": [{
                    "name": "Marketing",
                    "members": [{
                        "id": "M101", "name": "Lucas Scott", "role": "Marketing Manager",
                        "technologies": null,
                        "tasks": null,
                        "campaigns": [
                            {"id": "C001", "name": "Winter Sale", "status": "Ongoing"},
                            {"id": "C002", "name": "Black Friday Promo", "status": "Upcoming"}
                        ]
                    }]
                }]
            }
        ]
    });
    let from_json = build(&rules, &data).unwrap();

    assert_eq!(typed, from_json);
}

#[test]
fn test_rendered_xml_shape() {
    let xml = build_xml(&mapping_table(), &sample_company()).unwrap();

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<company>\n"));
    assert!(xml.contains("    <name>Global Enterprises</name>"));
    assert!(xml.contains("<branch>"));
    assert!(xml.contains("<technology>Spring Boot</technology>"));
    assert!(xml.trim_end().ends_with("</company>"));
    // no empty campaign containers for members without campaigns
    assert_eq!(xml.matches("<campaigns>").count(), 1);
}
