//! End-to-end tests for the component transform.

use pretty_assertions::assert_eq;
use vue_transformer::{transform, Severity, SourceMode, TransformError, TransformOptions};

const COUNTER: &str = "export default {
  name: 'Counter',
  data() {
    return {
      count: 0
    }
  },
  computed: {
    double() {
      return this.count * 2
    }
  },
  methods: {
    inc() {
      this.count++
    }
  },
  mounted() {
    console.log(this.double)
  }
}
";

const COUNTER_CLASS: &str = "import React, { Component } from 'react';

export default class Counter extends Component {
  constructor(props) {
    super(props);
    this.state = {
      count: 0
    };
  }

  get double() {
    return this.state.count * 2
  }

  inc() {
    this.state.count++
  }

  componentDidMount() {
    console.log(this.double)
  }
}
";

fn script_options(filename: &str) -> TransformOptions {
    TransformOptions {
        filename: Some(filename.to_string()),
        mode: SourceMode::Script,
        typescript: None,
    }
}

fn sfc_options(filename: &str) -> TransformOptions {
    TransformOptions {
        filename: Some(filename.to_string()),
        mode: SourceMode::Sfc,
        typescript: None,
    }
}

#[test]
fn test_counter_end_to_end() {
    let result = transform(COUNTER, script_options("Counter.js")).unwrap();
    assert_eq!(result.component_name, "Counter");
    assert_eq!(result.script, COUNTER_CLASS);
    assert!(result.template.is_none());
    assert_eq!(result.notices.len(), 1);
    assert_eq!(result.notices[0].to_string(), "[success] Transform success");
}

#[test]
fn test_output_is_deterministic() {
    let first = transform(COUNTER, script_options("Counter.js")).unwrap();
    let second = transform(COUNTER, script_options("Counter.js")).unwrap();
    assert_eq!(first.script, second.script);
}

#[test]
fn test_unsupported_member_is_reported_and_dropped() {
    let source = COUNTER.replace(
        "  mounted() {",
        "  watch() {\n    console.log(this.count)\n  },\n  mounted() {",
    );
    let result = transform(&source, script_options("Counter.js")).unwrap();

    assert_eq!(result.script, COUNTER_CLASS);
    let infos: Vec<String> = result
        .notices
        .iter()
        .filter(|notice| notice.severity == Severity::Info)
        .map(ToString::to_string)
        .collect();
    assert_eq!(infos, ["[info] 18:3 The watch method may not be supported now"]);
}

#[test]
fn test_unmatched_members_are_left_alone() {
    let source = "export default {
  name: 'plain',
  methods: {
    save() { this.$emit('save', this.draft, window.value) }
  }
}";
    let result = transform(source, script_options("plain.js")).unwrap();
    assert!(result
        .script
        .contains("  save() { this.$emit('save', this.draft, window.value) }\n"));
}

#[test]
fn test_computed_called_with_arguments() {
    let source = "export default {
  name: 'x',
  computed: { total() { return 1 } },
  methods: { log() { console.log(this.total(2)) } }
}";
    let err = transform(source, script_options("x.js")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "computed `total` is called with arguments at 4:34"
    );
}

#[test]
fn test_slot_conflict_is_rejected() {
    let source = "export default { name: 'x', props: ['a'], computed: { a() { return 1 } } }";
    let err = transform(source, script_options("x.js")).unwrap_err();
    assert_eq!(err.to_string(), "`a` is declared in both `props` and `computed`");
}

#[test]
fn test_script_mode_jsx_render() {
    let source = "export default {
  name: 'hello',
  props: ['who'],
  render(h) {
    return <p>Hello {this.who}</p>
  }
}";
    let result = transform(source, script_options("hello.jsx")).unwrap();
    assert_eq!(
        result.script,
        "import React, { Component } from 'react';
import PropTypes from 'prop-types';

export default class Hello extends Component {
  static propTypes = {
    who: PropTypes.any
  };

  render() {
    return <p>Hello {this.props.who}</p>
  }
}
"
    );
}

#[test]
fn test_wrapped_export_and_file_stem_name() {
    let source = "import Vue from 'vue'

export default Vue.extend({
  data: () => ({ open: false }),
  methods: {
    toggle() {
      this.open = !this.open
    }
  }
})
";
    let result = transform(source, script_options("src/drop-down.js")).unwrap();
    assert_eq!(result.component_name, "DropDown");
    assert!(result.script.contains("import Vue from 'vue'\n\nexport default class DropDown"));
    assert!(result
        .script
        .contains("  toggle() {\n    this.state.open = !this.state.open\n  }"));
}

#[test]
fn test_arrow_members_in_define_component() {
    let source = "export default defineComponent({
  name: 'logger',
  data: () => ({ n: 0 }),
  computed: {
    d: vm => vm.n * 2
  },
  methods: {
    log: msg => console.log(msg),
    other() { this.n++ }
  }
})
";
    let result = transform(source, script_options("logger.js")).unwrap();
    assert_eq!(
        result.script,
        "import React, { Component } from 'react';

export default class Logger extends Component {
  constructor(props) {
    super(props);
    this.state = {
      n: 0
    };
  }

  get d() {
    return this.state.n * 2;
  }

  log(msg) {
    return console.log(msg);
  }

  other() { this.state.n++ }
}
"
    );
}

#[test]
fn test_early_returning_data_is_reported() {
    let source = "export default {
  name: 'sized',
  props: ['big'],
  data() { if (this.big) return { n: 10 }; return { n: 1 } }
}";
    let result = transform(source, script_options("sized.js")).unwrap();
    assert!(!result.script.contains("constructor"));
    assert_eq!(
        result.notices[0].to_string(),
        "[info] 4:3 The data function returns early; it is left out"
    );
}

const TODO_LIST: &str = r#"<template>
  <div class="todo">
    <p>{{ title }}: {{ remaining }}</p>
    <Item v-for="item in items" :key="item.id" />
  </div>
</template>

<script>
import Item from './Item.vue'

export default {
  name: 'todo-list',
  components: { Item },
  props: {
    title: String
  },
  data() {
    return { items: [] }
  },
  computed: {
    remaining() {
      return this.items.filter(item => !item.done).length
    }
  }
}
</script>

<style scoped>
.todo { color: red; }
</style>
"#;

#[test]
fn test_single_file_component() {
    let result = transform(TODO_LIST, sfc_options("TodoList.vue")).unwrap();

    insta::assert_snapshot!(result.script, @r#"
import React, { Component } from 'react';
import PropTypes from 'prop-types';
import Item from './Item.vue'

export default class TodoList extends Component {
  static propTypes = {
    title: PropTypes.string
  };

  constructor(props) {
    super(props);
    this.state = {
      items: []
    };
  }

  get remaining() {
    return this.state.items.filter(item => !item.done).length
  }

  render() {
    return (
      <div class="todo">
        <p>{ title }: { remaining }</p>
        <Item v-for="item in items" :key="item.id" />
      </div>
    );
  }
}
"#);

    let template = result.template.unwrap();
    assert!(template.contains("<p>{ title }: { remaining }</p>"));
    assert!(!template.contains("{{"));
    assert_eq!(
        result.components.get("Item").map(String::as_str),
        Some("Item")
    );
}

#[test]
fn test_single_file_typescript() {
    let source = r#"<script lang="ts">
export default {
  name: 'typed',
  data() {
    return { n: 0 as number }
  }
}
</script>"#;
    let result = transform(source, sfc_options("Typed.vue")).unwrap();
    assert!(result.typescript);
    assert!(result.template.is_none());
    assert!(result.script.contains("      n: 0 as number\n"));
}

#[test]
fn test_single_file_parse_error() {
    let source = "<script>\nexport default {\n  data() {\n    return { a: 1 +  }\n  }\n}\n</script>";
    let err = transform(source, sfc_options("Broken.vue")).unwrap_err();
    assert!(matches!(err, TransformError::Parse { line: 4, .. }), "{err}");
}

#[test]
fn test_duplicate_script_blocks() {
    let source = "<script>export default {}</script>\n<script>export default {}</script>";
    let err = transform(source, sfc_options("Twice.vue")).unwrap_err();
    assert!(matches!(err, TransformError::Split(_)));
}
