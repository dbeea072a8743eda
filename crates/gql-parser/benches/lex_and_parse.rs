use std::rc::Rc;

use criterion::black_box;
use criterion::criterion_group;
use criterion::criterion_main;
use criterion::Criterion;
use criterion::Throughput;

use gql_parser::{parse, Lexer, ParserOptions, Source};

const SMALL_SCHEMA: &str = r#"
type Query {
  hero(episode: Episode): Character
}

enum Episode {
  NEWHOPE
  EMPIRE
  JEDI
}

interface Character {
  id: ID!
  name: String!
}
"#;

const MEDIUM_SCHEMA: &str = r#"
schema {
  query: Query
  mutation: Mutation
}

type Query {
  hero(episode: Episode): Character
  human(id: ID!): Human
  droid(id: ID!): Droid
  reviews(episode: Episode!): [Review]!
}

type Mutation {
  createReview(episode: Episode, review: ReviewInput!): Review
}

enum Episode {
  NEWHOPE
  EMPIRE
  JEDI
}

interface Character {
  id: ID!
  name: String!
  friends: [Character]
  appearsIn: [Episode]!
}

type Human implements Character {
  id: ID!
  name: String!
  friends: [Character]
  appearsIn: [Episode]!
  homePlanet: String
}

type Droid implements Character {
  id: ID!
  name: String!
  friends: [Character]
  appearsIn: [Episode]!
  primaryFunction: String
}

type Review {
  episode: Episode
  stars: Int!
  commentary: String
}

input ReviewInput {
  stars: Int!
  commentary: String
}
"#;

const SIMPLE_QUERY: &str = r#"
query HeroQuery {
  hero {
    id
    name
  }
}
"#;

const COMPLEX_QUERY: &str = r#"
query HeroForEpisode($ep: Episode!, $withFriends: Boolean!) {
  hero(episode: $ep) {
    id
    name
    ...HumanFields @include(if: $withFriends)
    ... on Droid {
      primaryFunction
    }
  }
}

fragment HumanFields on Human {
  homePlanet
  friends {
    name
  }
}
"#;

fn deeply_nested_query(depth: usize) -> String {
    let mut query = String::from("query Nested {\n  hero {\n");
    for _ in 0..depth {
        query.push_str("    friends {\n");
    }
    query.push_str("      name\n");
    for _ in 0..depth {
        query.push_str("    }\n");
    }
    query.push_str("  }\n}\n");
    query
}

fn schema_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("schema_parse");

    group.bench_function("small", |b| {
        b.iter(|| black_box(parse(SMALL_SCHEMA, ParserOptions::default())))
    });

    group.bench_function("medium", |b| {
        b.iter(|| black_box(parse(MEDIUM_SCHEMA, ParserOptions::default())))
    });

    group.finish();
}

fn executable_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("executable_parse");

    group.bench_function("simple_query", |b| {
        b.iter(|| black_box(parse(SIMPLE_QUERY, ParserOptions::default())))
    });

    group.bench_function("complex_query", |b| {
        b.iter(|| black_box(parse(COMPLEX_QUERY, ParserOptions::default())))
    });

    let nested_10 = deeply_nested_query(10);
    group.bench_function("nested_depth_10", |b| {
        b.iter(|| black_box(parse(nested_10.as_str(), ParserOptions::default())))
    });

    let nested_30 = deeply_nested_query(30);
    group.bench_function("nested_depth_30", |b| {
        b.iter(|| black_box(parse(nested_30.as_str(), ParserOptions::default())))
    });

    group.finish();
}

fn lexer(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");

    group.throughput(Throughput::Bytes(SMALL_SCHEMA.len() as u64));
    group.bench_function("small_schema", |b| {
        b.iter(|| {
            let source = Rc::new(Source::new(SMALL_SCHEMA, "bench.graphql"));
            black_box(Lexer::new(source))
        })
    });

    group.throughput(Throughput::Bytes(MEDIUM_SCHEMA.len() as u64));
    group.bench_function("medium_schema", |b| {
        b.iter(|| {
            let source = Rc::new(Source::new(MEDIUM_SCHEMA, "bench.graphql"));
            black_box(Lexer::new(source))
        })
    });

    group.finish();
}

criterion_group!(benches, schema_parse, executable_parse, lexer);
criterion_main!(benches);
