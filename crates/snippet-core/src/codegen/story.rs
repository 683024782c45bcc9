//! Storybook story rendering

/// Everything a story file refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryDescriptor {
    /// Class name of the leaf component
    pub component: String,
    /// Import specifier of the leaf component (`./basic-card.component`)
    pub component_import: String,
    /// Class name of the nearest container module
    pub module: String,
    /// Import specifier of the nearest container module
    pub module_import: String,
    /// Sidebar title (`Cards / Basic Card`)
    pub title: String,
}

/// Escape a value for a single-quoted TypeScript string
fn quote(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

impl StoryDescriptor {
    /// Render the story file: the component, its module as import context and
    /// a single `Default` story without arguments.
    pub fn render(&self) -> String {
        format!(
            "import type {{ Meta, StoryObj }} from '@storybook/angular';
import {{ moduleMetadata }} from '@storybook/angular';
import {{ CommonModule }} from '@angular/common';
import {{ {component} }} from '{component_import}';
import {{ {module} }} from '{module_import}';

const meta: Meta<{component}> = {{
  title: '{title}',
  component: {component},
  decorators: [
    moduleMetadata({{
      imports: [CommonModule, {module}],
    }}),
  ],
}};
export default meta;

type Story = StoryObj<{component}>;

export const Default: Story = {{
  args: {{}},
}};
",
            component = self.component,
            component_import = self.component_import,
            module = self.module,
            module_import = self.module_import,
            title = quote(&self.title),
        )
    }
}
